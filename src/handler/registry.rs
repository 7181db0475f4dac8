//! Method registry keyed by qualifier.
//!
//! Decoded messages carry a qualifier; the registry resolves it to the
//! invoker that should receive the message. Lookup misses are `None`,
//! not errors: whether an unroutable qualifier is fatal is the
//! caller's policy.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::message::StreamMessage;

/// Boxed future for invoker results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of one method invocation.
pub type InvokerResult =
    Result<StreamMessage, Box<dyn std::error::Error + Send + Sync>>;

/// A callable that handles messages routed to one qualifier.
pub trait MethodInvoker: Send + Sync + 'static {
    /// Invoke with a decoded request message.
    fn invoke(&self, request: StreamMessage) -> BoxFuture<'static, InvokerResult>;
}

/// Adapter turning an async closure into a [`MethodInvoker`].
pub struct FnInvoker<F> {
    f: F,
}

impl<F> FnInvoker<F> {
    /// Wrap an async closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> MethodInvoker for FnInvoker<F>
where
    F: Fn(StreamMessage) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = InvokerResult> + Send + 'static,
{
    fn invoke(&self, request: StreamMessage) -> BoxFuture<'static, InvokerResult> {
        Box::pin((self.f)(request))
    }
}

/// Registry mapping qualifiers to invokers.
#[derive(Default)]
pub struct MethodRegistry {
    invokers: HashMap<String, Arc<dyn MethodInvoker>>,
}

impl MethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an invoker under a qualifier.
    ///
    /// Re-registering a qualifier replaces the previous invoker.
    pub fn register(&mut self, qualifier: impl Into<String>, invoker: Arc<dyn MethodInvoker>) {
        let qualifier = qualifier.into();
        tracing::debug!(qualifier = %qualifier, "registering method invoker");
        self.invokers.insert(qualifier, invoker);
    }

    /// Register an async closure under a qualifier.
    pub fn register_fn<F, Fut>(&mut self, qualifier: impl Into<String>, f: F)
    where
        F: Fn(StreamMessage) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InvokerResult> + Send + 'static,
    {
        self.register(qualifier, Arc::new(FnInvoker::new(f)));
    }

    /// Check whether a qualifier has an invoker.
    pub fn contains_invoker(&self, qualifier: &str) -> bool {
        self.invokers.contains_key(qualifier)
    }

    /// Get the invoker for a qualifier.
    pub fn invoker(&self, qualifier: &str) -> Option<Arc<dyn MethodInvoker>> {
        self.invokers.get(qualifier).cloned()
    }

    /// Number of registered qualifiers.
    pub fn len(&self) -> usize {
        self.invokers.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invokers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn echo_registry() -> MethodRegistry {
        let mut registry = MethodRegistry::new();
        registry.register_fn("svc/echo", |request: StreamMessage| async move {
            Ok(request)
        });
        registry
    }

    #[test]
    fn test_contains_invoker() {
        let registry = echo_registry();
        assert!(registry.contains_invoker("svc/echo"));
        assert!(!registry.contains_invoker("svc/missing"));
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let registry = MethodRegistry::new();
        assert!(registry.invoker("svc/echo").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = echo_registry();
        registry.register_fn("svc/echo", |_request: StreamMessage| async move {
            Ok(StreamMessage::builder().qualifier("replaced").build())
        });
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_echo() {
        let registry = echo_registry();
        let request = StreamMessage::builder()
            .qualifier("svc/echo")
            .data(Bytes::from_static(b"ping"))
            .build();

        let invoker = registry.invoker("svc/echo").unwrap();
        let response = invoker.invoke(request.clone()).await.unwrap();
        assert_eq!(response, request);
    }

    #[tokio::test]
    async fn test_invoker_error_propagates() {
        let mut registry = MethodRegistry::new();
        registry.register_fn("svc/fail", |_request: StreamMessage| async move {
            Err("boom".into())
        });

        let invoker = registry.invoker("svc/fail").unwrap();
        let err = invoker
            .invoke(StreamMessage::builder().build())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
