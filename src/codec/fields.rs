//! Field classification for the message codec.
//!
//! The codec knows exactly two kinds of fields. *Flat* fields are
//! string-valued metadata and travel as STRING parts; *match* fields
//! are raw payloads and travel as BINARY parts. Both lists are fixed
//! for the codec's lifetime and disjoint; changing them means a new
//! wire protocol, not runtime registration.

use crate::message::{DATA_NAME, QUALIFIER_NAME, SENDER_ID_NAME, STREAM_ID_NAME};

/// String-valued metadata fields, in canonical encode order.
pub const FLAT_FIELDS: [&str; 3] = [QUALIFIER_NAME, SENDER_ID_NAME, STREAM_ID_NAME];

/// Raw-payload fields, encoded after all flat fields.
pub const MATCH_FIELDS: [&str; 1] = [DATA_NAME];

/// Check whether a name is a flat (string) field.
#[inline]
pub fn is_flat_field(name: &str) -> bool {
    FLAT_FIELDS.contains(&name)
}

/// Check whether a name is a match (binary) field.
#[inline]
pub fn is_match_field(name: &str) -> bool {
    MATCH_FIELDS.contains(&name)
}
