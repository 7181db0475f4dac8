//! # streamwire
//!
//! Wire-level codec for service-messaging streams.
//!
//! Converts an in-memory [`StreamMessage`] (routing metadata plus an
//! opaque payload) to and from a compact self-describing binary form,
//! and resolves decoded qualifiers to method invokers.
//!
//! ## Architecture
//!
//! - **Message** ([`message`]): immutable value built once via a
//!   builder; four independently optional attributes.
//! - **Codec** ([`codec`]): frames each present attribute as one named
//!   part; flat metadata as UTF-8 STRING parts, payloads as BINARY
//!   parts sliced zero-copy from the source buffer.
//! - **Handler** ([`handler`]): qualifier-to-invoker lookup table.
//!
//! The codec owns no transport: connection handling, stream framing
//! and flow control belong to the layer feeding it buffers.
//!
//! ## Example
//!
//! ```
//! use streamwire::{StreamMessage, StreamMessageCodec};
//! use bytes::Bytes;
//!
//! let message = StreamMessage::builder()
//!     .qualifier("svc/echo")
//!     .sender_id("node-1")
//!     .data(Bytes::from_static(&[0x01, 0x02, 0x03]))
//!     .build();
//!
//! let wire = StreamMessageCodec::encode(&message).unwrap();
//! let decoded = StreamMessageCodec::decode(&wire).unwrap();
//!
//! assert_eq!(decoded, message);
//! // The decoded payload aliases `wire`, no copy was made.
//! ```

pub mod codec;
pub mod error;
pub mod handler;
pub mod message;

pub use codec::StreamMessageCodec;
pub use error::{DecodeError, EncodeError, MalformedPart};
pub use message::{StreamMessage, StreamMessageBuilder};
