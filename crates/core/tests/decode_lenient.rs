use std::borrow::Cow;

use salvage_core::decode::{decode_lenient, PLACEHOLDER};

#[test]
fn valid_utf8_is_borrowed_unchanged() {
    let text = decode_lenient("makro_costs: [1, 2] é".as_bytes());
    assert!(matches!(text, Cow::Borrowed(_)));
    assert_eq!(text, "makro_costs: [1, 2] é");
}

#[test]
fn invalid_bytes_become_placeholders() {
    let text = decode_lenient(b"ab\xffcd\xfe\xfeef");
    assert_eq!(text, "ab\u{FFFD}cd\u{FFFD}\u{FFFD}ef");
    assert_eq!(text.chars().filter(|&c| c == PLACEHOLDER).count(), 3);
}

#[test]
fn truncated_sequence_is_one_placeholder() {
    // First two bytes of a three-byte sequence, then ASCII.
    let text = decode_lenient(b"x\xe2\x82y");
    assert_eq!(text, "x\u{FFFD}y");
}

#[test]
fn decoding_is_total_and_deterministic() {
    let every_byte: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let first = decode_lenient(&every_byte);
    let second = decode_lenient(&every_byte);
    assert_eq!(first, second);
    assert!(first.contains(PLACEHOLDER));
    assert!(first.contains("ABC"));
}
