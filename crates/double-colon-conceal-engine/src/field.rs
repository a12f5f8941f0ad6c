//! Field separator classification.
//!
//! A field is written `Name:: value`. The name is everything before the first
//! `::` and must not leave a `[` or `(` open, so `Tags (optional):: a` is a
//! field while `[draft:: note` (an unterminated link or tag) is not.

/// The field separator token.
pub const SEPARATOR: &str = "::";

/// Whether `text` is acceptable as a field name.
///
/// Square and round brackets are counted independently. A closer decrements
/// its count but never below zero, so a stray closer before any opener is
/// forgotten. The name is valid when nothing is left open. The empty string
/// is vacuously valid.
pub fn is_valid_field_name(text: &str) -> bool {
    let mut square = 0usize;
    let mut round = 0usize;
    for ch in text.chars() {
        match ch {
            '[' => square += 1,
            ']' => square = square.saturating_sub(1),
            '(' => round += 1,
            ')' => round = round.saturating_sub(1),
            _ => {}
        }
    }
    square == 0 && round == 0
}

/// Whether `text` starts with a field: a non-empty valid name followed by `::`.
///
/// Only the first `::` matters; anything after it is the value.
pub fn includes_field(text: &str) -> bool {
    match text.split_once(SEPARATOR) {
        Some((name, _)) => !name.is_empty() && is_valid_field_name(name),
        None => false,
    }
}

/// Byte index of the separator that [`includes_field`] accepted.
pub fn separator_index(text: &str) -> Option<usize> {
    if includes_field(text) {
        text.find(SEPARATOR)
    } else {
        None
    }
}

/// Replaces the first `::` in `text` with `replacement`.
///
/// Text without a separator is returned unchanged, so running this over text
/// that was already concealed does nothing.
pub fn conceal_double_colon(text: &str, replacement: &str) -> String {
    text.replacen(SEPARATOR, replacement, 1)
}
