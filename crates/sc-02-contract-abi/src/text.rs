//! Decoding of fixed-size byte strings (e.g. `bytes32` names) into text.
//!
//! Contracts store short labels as zero-padded `bytes32`. Reading them back
//! maps each byte to the character with the same code point, then drops
//! everything that is not a word character or whitespace, which removes the
//! NUL padding.

/// Map every byte to the character with the same code point (latin-1).
pub fn to_ascii(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(*b)).collect()
}

/// Keep ASCII letters, digits, `_` and whitespace; drop everything else.
pub fn strip_non_word(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || is_space(*c))
        .collect()
}

/// Whitespace in the latin-1 range. NEL (U+0085) is not included.
fn is_space(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | ' ' | '\u{a0}')
}

/// `strip_non_word(to_ascii(bytes))`.
pub fn decode_text(bytes: &[u8]) -> String {
    strip_non_word(&to_ascii(bytes))
}
