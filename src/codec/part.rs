//! Part framing - the atomic unit of the wire format.
//!
//! A message is a sequence of self-describing parts. Each part is laid
//! out as:
//!
//! ```text
//! ┌──────────┬───────────────┬───────┬───────────┬────────────────┐
//! │ NAME_LEN │ NAME          │ TYPE  │ VALUE_LEN │ VALUE          │
//! │ 4 bytes  │ NAME_LEN bytes│ 1 byte│ 4 bytes   │ VALUE_LEN bytes│
//! │ u32 BE   │ UTF-8         │       │ u32 BE    │                │
//! └──────────┴───────────────┴───────┴───────────┴────────────────┘
//! ```
//!
//! All length prefixes are Big Endian u32. There is no part count on
//! the wire; a reader consumes parts until the buffer is exhausted.
//!
//! STRING values are copied into owned strings on read (short-lived
//! metadata). BINARY values are never copied: the VALUE region is
//! sliced out of the source buffer via [`Bytes::split_to`], so the
//! returned handle aliases the source allocation.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{EncodeError, MalformedPart};

/// Size of each u32 length prefix.
pub(crate) const LEN_PREFIX_SIZE: usize = 4;

/// Size of the type discriminator.
pub(crate) const TYPE_SIZE: usize = 1;

/// Default cap on a single part's name or value (1 GB).
///
/// The wire format itself allows u32::MAX; the default cap rejects
/// absurd lengths long before they reach a length prefix.
pub const MAX_PART_VALUE_SIZE: u32 = 1_073_741_824;

/// Wire type discriminator for a part value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PartType {
    /// UTF-8 text, copied into an owned string on read.
    String = 0,
    /// Raw bytes, sliced zero-copy from the source buffer on read.
    Binary = 1,
}

impl PartType {
    /// Parse a type discriminator byte.
    ///
    /// Returns `None` for any value other than 0 or 1.
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::String),
            1 => Some(Self::Binary),
            _ => None,
        }
    }
}

/// A decoded part value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PartValue {
    /// Owned UTF-8 text.
    Text(String),
    /// Zero-copy slice of the source buffer.
    Binary(Bytes),
}

impl PartValue {
    /// The wire type this value decodes from.
    pub(crate) fn part_type(&self) -> PartType {
        match self {
            Self::Text(_) => PartType::String,
            Self::Binary(_) => PartType::Binary,
        }
    }
}

/// One decoded part. Exists only during codec traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Part {
    /// Field name, always valid UTF-8.
    pub(crate) name: String,
    /// Decoded value.
    pub(crate) value: PartValue,
}

/// Bytes one part with the given name and value occupies on the wire.
#[inline]
pub(crate) fn part_wire_len(name: &str, value_len: usize) -> usize {
    LEN_PREFIX_SIZE + name.len() + TYPE_SIZE + LEN_PREFIX_SIZE + value_len
}

/// Append a STRING part to the target buffer.
pub(crate) fn write_text_part(
    buf: &mut BytesMut,
    name: &str,
    value: &str,
    max_value_len: u32,
) -> Result<(), EncodeError> {
    write_part(buf, name, PartType::String, value.as_bytes(), max_value_len)
}

/// Append a BINARY part to the target buffer. The value bytes are
/// written verbatim, no transcoding.
pub(crate) fn write_binary_part(
    buf: &mut BytesMut,
    name: &str,
    value: &[u8],
    max_value_len: u32,
) -> Result<(), EncodeError> {
    write_part(buf, name, PartType::Binary, value, max_value_len)
}

fn write_part(
    buf: &mut BytesMut,
    name: &str,
    part_type: PartType,
    value: &[u8],
    max_value_len: u32,
) -> Result<(), EncodeError> {
    check_segment_len(name, name.len(), max_value_len)?;
    check_segment_len(name, value.len(), max_value_len)?;

    buf.reserve(part_wire_len(name, value.len()));
    buf.put_u32(name.len() as u32);
    buf.put_slice(name.as_bytes());
    buf.put_u8(part_type as u8);
    buf.put_u32(value.len() as u32);
    buf.put_slice(value);
    Ok(())
}

fn check_segment_len(name: &str, len: usize, max: u32) -> Result<(), EncodeError> {
    if len > max as usize {
        return Err(EncodeError::PartTooLarge {
            name: name.to_string(),
            len,
            max,
        });
    }
    Ok(())
}

/// Consume one part from the front of the view.
///
/// The view must be a private clone of the caller-facing buffer; this
/// function advances it. BINARY values alias the view's backing
/// allocation.
///
/// # Errors
///
/// [`MalformedPart`] when a declared length exceeds the remaining
/// bytes, the name is not valid UTF-8, or the type discriminator is
/// unknown.
pub(crate) fn read_part(view: &mut Bytes) -> Result<Part, MalformedPart> {
    let name_len = read_len(view)?;
    let name_bytes = split_checked(view, name_len)?;
    let name = std::str::from_utf8(&name_bytes)
        .map_err(MalformedPart::InvalidName)?
        .to_string();

    let type_byte = read_u8(view)?;
    let part_type =
        PartType::from_u8(type_byte).ok_or(MalformedPart::UnknownType(type_byte))?;

    let value_len = read_len(view)?;
    let value_bytes = split_checked(view, value_len)?;

    let value = match part_type {
        PartType::String => PartValue::Text(
            std::str::from_utf8(&value_bytes)
                .map_err(MalformedPart::InvalidText)?
                .to_string(),
        ),
        PartType::Binary => PartValue::Binary(value_bytes),
    };

    Ok(Part { name, value })
}

fn read_len(view: &mut Bytes) -> Result<usize, MalformedPart> {
    if view.remaining() < LEN_PREFIX_SIZE {
        return Err(MalformedPart::Truncated {
            needed: LEN_PREFIX_SIZE,
            remaining: view.remaining(),
        });
    }
    Ok(view.get_u32() as usize)
}

fn read_u8(view: &mut Bytes) -> Result<u8, MalformedPart> {
    if view.remaining() < TYPE_SIZE {
        return Err(MalformedPart::Truncated {
            needed: TYPE_SIZE,
            remaining: view.remaining(),
        });
    }
    Ok(view.get_u8())
}

fn split_checked(view: &mut Bytes, len: usize) -> Result<Bytes, MalformedPart> {
    if view.remaining() < len {
        return Err(MalformedPart::Truncated {
            needed: len,
            remaining: view.remaining(),
        });
    }
    Ok(view.split_to(len))
}
