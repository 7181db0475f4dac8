//! Handler module - service method lookup.
//!
//! Provides:
//! - [`MethodRegistry`] - maps qualifiers to invokers
//! - [`MethodInvoker`] - the callable a qualifier routes to
//!
//! The registry is pure routing glue: it answers "which invoker owns
//! this qualifier", nothing more. Dispatch loops and transports live
//! above this crate.
//!
//! # Example
//!
//! ```
//! use streamwire::handler::MethodRegistry;
//! use streamwire::StreamMessage;
//!
//! let mut registry = MethodRegistry::new();
//! registry.register_fn("svc/echo", |request: StreamMessage| async move {
//!     Ok(request)
//! });
//!
//! assert!(registry.contains_invoker("svc/echo"));
//! assert!(registry.invoker("svc/missing").is_none());
//! ```

mod registry;

pub use registry::{BoxFuture, FnInvoker, InvokerResult, MethodInvoker, MethodRegistry};
