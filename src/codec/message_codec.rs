//! Message-level encode/decode over the part framer.
//!
//! [`StreamMessageCodec`] walks the classifier's field lists and frames
//! one part per present attribute. Encode always emits flat fields
//! first, then match fields, each list in declared order; decode is
//! order-independent because parts are self-describing by name.
//!
//! The codec holds no state. Both operations are single-pass
//! transforms over already-materialized memory and may run concurrently
//! from any number of threads.
//!
//! # Example
//!
//! ```
//! use streamwire::{StreamMessage, StreamMessageCodec};
//! use bytes::Bytes;
//!
//! let message = StreamMessage::builder()
//!     .qualifier("svc/echo")
//!     .data(Bytes::from_static(b"ping"))
//!     .build();
//!
//! let wire = StreamMessageCodec::encode(&message).unwrap();
//! let decoded = StreamMessageCodec::decode(&wire).unwrap();
//! assert_eq!(decoded, message);
//! ```

use bytes::{Bytes, BytesMut};

use super::fields::{FLAT_FIELDS, MATCH_FIELDS};
use super::part::{
    part_wire_len, read_part, write_binary_part, write_text_part, PartType, PartValue,
    MAX_PART_VALUE_SIZE,
};
use crate::error::{DecodeError, EncodeError};
use crate::message::{
    StreamMessage, DATA_NAME, QUALIFIER_NAME, SENDER_ID_NAME, STREAM_ID_NAME,
};

/// Stateless codec between [`StreamMessage`] and its wire form.
///
/// Implemented as a marker struct with associated functions, not a
/// trait object; there is no instance state to configure.
pub struct StreamMessageCodec;

impl StreamMessageCodec {
    /// Decode a message from a buffer.
    ///
    /// The caller's handle is not advanced or mutated; decoding works
    /// on a private clone of it, so the same buffer can be re-read or
    /// re-dispatched afterwards. BINARY parts are sliced zero-copy:
    /// the returned message's payload shares `source`'s backing
    /// allocation.
    ///
    /// Parts with names outside the known field sets are skipped, so
    /// buffers from newer protocol revisions still decode.
    ///
    /// # Errors
    ///
    /// [`DecodeError`] on the first malformed part or type mismatch;
    /// no partial message is returned.
    pub fn decode(source: &Bytes) -> Result<StreamMessage, DecodeError> {
        let mut view = source.clone();
        let mut builder = StreamMessage::builder();

        while !view.is_empty() {
            let part = read_part(&mut view)?;
            match part.name.as_str() {
                QUALIFIER_NAME => builder = builder.qualifier(expect_text(QUALIFIER_NAME, part.value)?),
                SENDER_ID_NAME => builder = builder.sender_id(expect_text(SENDER_ID_NAME, part.value)?),
                STREAM_ID_NAME => builder = builder.stream_id(expect_text(STREAM_ID_NAME, part.value)?),
                DATA_NAME => builder = builder.data(expect_binary(DATA_NAME, part.value)?),
                other => {
                    tracing::trace!(name = %other, "skipping unknown part");
                }
            }
        }

        Ok(builder.build())
    }

    /// Encode a message to a freshly allocated buffer.
    ///
    /// Present attributes are written in canonical order (flat fields,
    /// then match fields); absent attributes produce no part. On
    /// success the buffer's ownership transfers to the caller.
    ///
    /// # Errors
    ///
    /// [`EncodeError`] if any part exceeds the wire's size cap. The
    /// output buffer is owned by this call and dropped before the
    /// error propagates; it never leaks on a failure path.
    pub fn encode(message: &StreamMessage) -> Result<Bytes, EncodeError> {
        Self::encode_with_limit(message, MAX_PART_VALUE_SIZE)
    }

    /// Encode with a caller-chosen per-part size cap.
    ///
    /// For transports that bound message size below the default cap.
    pub fn encode_with_limit(
        message: &StreamMessage,
        max_value_len: u32,
    ) -> Result<Bytes, EncodeError> {
        let mut buf = BytesMut::with_capacity(encoded_size_hint(message));

        for name in FLAT_FIELDS {
            if let Some(value) = flat_value(message, name) {
                write_text_part(&mut buf, name, value, max_value_len)?;
            }
        }
        for name in MATCH_FIELDS {
            if let Some(value) = match_value(message, name) {
                write_binary_part(&mut buf, name, value, max_value_len)?;
            }
        }

        Ok(buf.freeze())
    }
}

/// Flat-field getter table: classifier name to message attribute.
fn flat_value<'a>(message: &'a StreamMessage, name: &str) -> Option<&'a str> {
    match name {
        QUALIFIER_NAME => message.qualifier(),
        SENDER_ID_NAME => message.sender_id(),
        STREAM_ID_NAME => message.stream_id(),
        _ => None,
    }
}

/// Match-field getter table.
fn match_value<'a>(message: &'a StreamMessage, name: &str) -> Option<&'a Bytes> {
    match name {
        DATA_NAME => message.data(),
        _ => None,
    }
}

fn expect_text(field: &'static str, value: PartValue) -> Result<String, DecodeError> {
    match value {
        PartValue::Text(text) => Ok(text),
        other => Err(DecodeError::TypeMismatch {
            field,
            expected: PartType::String,
            actual: other.part_type(),
        }),
    }
}

fn expect_binary(field: &'static str, value: PartValue) -> Result<Bytes, DecodeError> {
    match value {
        PartValue::Binary(bytes) => Ok(bytes),
        other => Err(DecodeError::TypeMismatch {
            field,
            expected: PartType::Binary,
            actual: other.part_type(),
        }),
    }
}

fn encoded_size_hint(message: &StreamMessage) -> usize {
    let mut size = 0;
    for name in FLAT_FIELDS {
        if let Some(value) = flat_value(message, name) {
            size += part_wire_len(name, value.len());
        }
    }
    for name in MATCH_FIELDS {
        if let Some(value) = match_value(message, name) {
            size += part_wire_len(name, value.len());
        }
    }
    size
}
