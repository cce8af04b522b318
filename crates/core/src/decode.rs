//! Lenient text decoding of raw table bytes.

use std::borrow::Cow;

/// Character substituted for every undecodable byte sequence.
pub const PLACEHOLDER: char = char::REPLACEMENT_CHARACTER;

/// Decode `bytes` as UTF-8 without ever failing.
///
/// Table files mix binary framing with UTF-8 payloads. Each maximal invalid
/// subsequence becomes a single [`PLACEHOLDER`], so offsets in the text stay
/// close to offsets in the bytes. Valid input is borrowed, not copied.
pub fn decode_lenient(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
