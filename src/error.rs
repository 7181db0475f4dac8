//! Error types for streamwire.

use thiserror::Error;

use crate::codec::PartType;

/// Structural failure while reading a single part from the wire.
///
/// A malformed part rejects the whole buffer; there is no way to
/// resynchronize inside a part stream.
#[derive(Debug, Error)]
pub enum MalformedPart {
    /// A declared length exceeds the bytes remaining in the buffer.
    #[error("part truncated: {needed} bytes declared, {remaining} remain")]
    Truncated {
        /// Bytes the declared length requires.
        needed: usize,
        /// Bytes actually left in the buffer.
        remaining: usize,
    },

    /// The part name is not valid UTF-8.
    #[error("part name is not valid UTF-8")]
    InvalidName(#[source] std::str::Utf8Error),

    /// A STRING part's value is not valid UTF-8.
    #[error("string part value is not valid UTF-8")]
    InvalidText(#[source] std::str::Utf8Error),

    /// The type discriminator is neither STRING (0) nor BINARY (1).
    #[error("unknown part type discriminator: {0}")]
    UnknownType(u8),
}

/// Error surfaced by [`StreamMessageCodec::decode`].
///
/// [`StreamMessageCodec::decode`]: crate::codec::StreamMessageCodec::decode
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Truncated or structurally invalid bytes in a part.
    #[error("malformed part: {0}")]
    Malformed(#[from] MalformedPart),

    /// A known field name carried the wrong type discriminator.
    ///
    /// Signals a protocol-version or sender bug, never a transient
    /// condition.
    #[error("field '{field}' expected {expected:?} part, decoded {actual:?}")]
    TypeMismatch {
        /// The field name that was decoded.
        field: &'static str,
        /// The part type the field requires.
        expected: PartType,
        /// The part type found on the wire.
        actual: PartType,
    },
}

/// Error surfaced by [`StreamMessageCodec::encode`].
///
/// The output buffer allocated by encode is guaranteed dropped before
/// this error reaches the caller.
///
/// [`StreamMessageCodec::encode`]: crate::codec::StreamMessageCodec::encode
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A part name or value does not fit the wire's u32 length prefix
    /// or the configured per-part cap.
    #[error("part '{name}' is {len} bytes, exceeds limit {max}")]
    PartTooLarge {
        /// Name of the offending part.
        name: String,
        /// Actual byte length of the oversized segment.
        len: usize,
        /// The cap that was exceeded.
        max: u32,
    },
}
