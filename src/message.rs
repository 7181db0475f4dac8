//! Stream message data model.
//!
//! A [`StreamMessage`] carries routing metadata (qualifier, sender id,
//! stream id) plus an opaque binary payload. All four attributes are
//! independently optional, and absence is distinct from an empty value:
//! an empty string or an empty payload still encodes as a part on the
//! wire, an absent attribute produces no part at all.
//!
//! Messages are built once and never mutated:
//!
//! ```
//! use streamwire::StreamMessage;
//! use bytes::Bytes;
//!
//! let message = StreamMessage::builder()
//!     .qualifier("svc/echo")
//!     .sender_id("node-1")
//!     .data(Bytes::from_static(b"ping"))
//!     .build();
//!
//! assert_eq!(message.qualifier(), Some("svc/echo"));
//! assert!(!message.contains_stream_id());
//! ```

use bytes::Bytes;

/// Wire name of the qualifier field.
pub const QUALIFIER_NAME: &str = "qualifier";
/// Wire name of the sender id field.
pub const SENDER_ID_NAME: &str = "senderId";
/// Wire name of the stream id field.
pub const STREAM_ID_NAME: &str = "streamId";
/// Wire name of the data field.
pub const DATA_NAME: &str = "data";

/// One routed message: metadata strings plus an opaque payload.
///
/// Decoded messages hold their payload as a [`Bytes`] handle that
/// shares the source buffer's backing allocation. The handle keeps
/// that allocation alive, so the payload stays valid however long the
/// message outlives the buffer it was decoded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamMessage {
    qualifier: Option<String>,
    sender_id: Option<String>,
    stream_id: Option<String>,
    data: Option<Bytes>,
}

impl StreamMessage {
    /// Start building a new message.
    pub fn builder() -> StreamMessageBuilder {
        StreamMessageBuilder::default()
    }

    /// Start a builder seeded with an existing message's attributes.
    ///
    /// Cloning the payload is a refcount bump, not a copy.
    pub fn from(message: &StreamMessage) -> StreamMessageBuilder {
        StreamMessageBuilder {
            qualifier: message.qualifier.clone(),
            sender_id: message.sender_id.clone(),
            stream_id: message.stream_id.clone(),
            data: message.data.clone(),
        }
    }

    /// Get the routing qualifier, if present.
    #[inline]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Get the sender id, if present.
    #[inline]
    pub fn sender_id(&self) -> Option<&str> {
        self.sender_id.as_deref()
    }

    /// Get the stream id, if present.
    #[inline]
    pub fn stream_id(&self) -> Option<&str> {
        self.stream_id.as_deref()
    }

    /// Get the payload, if present.
    #[inline]
    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// Check whether a qualifier is present.
    #[inline]
    pub fn contains_qualifier(&self) -> bool {
        self.qualifier.is_some()
    }

    /// Check whether a sender id is present.
    #[inline]
    pub fn contains_sender_id(&self) -> bool {
        self.sender_id.is_some()
    }

    /// Check whether a stream id is present.
    #[inline]
    pub fn contains_stream_id(&self) -> bool {
        self.stream_id.is_some()
    }

    /// Check whether a payload is present.
    #[inline]
    pub fn contains_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Accumulates attributes and produces one immutable [`StreamMessage`].
#[derive(Debug, Clone, Default)]
pub struct StreamMessageBuilder {
    qualifier: Option<String>,
    sender_id: Option<String>,
    stream_id: Option<String>,
    data: Option<Bytes>,
}

impl StreamMessageBuilder {
    /// Set the routing qualifier.
    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Set the sender id.
    pub fn sender_id(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Set the stream id.
    pub fn stream_id(mut self, stream_id: impl Into<String>) -> Self {
        self.stream_id = Some(stream_id.into());
        self
    }

    /// Set the payload.
    pub fn data(mut self, data: Bytes) -> Self {
        self.data = Some(data);
        self
    }

    /// Finalize into an immutable message.
    pub fn build(self) -> StreamMessage {
        StreamMessage {
            qualifier: self.qualifier,
            sender_id: self.sender_id,
            stream_id: self.stream_id,
            data: self.data,
        }
    }
}
