//! Codec module - the wire format for stream messages.
//!
//! A message travels as a sequence of self-describing named parts:
//! - [`FLAT_FIELDS`] / [`MATCH_FIELDS`] - which names exist and how
//!   each one is typed
//! - part framing - one name + type + value unit per present field
//! - [`StreamMessageCodec`] - whole-message encode/decode
//!
//! # Design
//!
//! The codec is a marker struct with associated functions rather than
//! a configurable object. All state lives in the buffers passed in and
//! out, so encode and decode are reentrant and freely concurrent.

mod fields;
mod message_codec;
mod part;

pub use fields::{is_flat_field, is_match_field, FLAT_FIELDS, MATCH_FIELDS};
pub use message_codec::StreamMessageCodec;
pub use part::{PartType, MAX_PART_VALUE_SIZE};
