//! The 36-symbol index alphabet.
//!
//! Letters map to `0..26` by their case-insensitive position in the
//! alphabet, digits map to `26..36` by numeric value. Nothing else is
//! indexable.

/// Number of child slots per trie node.
pub const ALPHABET_SIZE: usize = 36;

const SYMBOLS: &[u8; ALPHABET_SIZE] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Map a character to its child slot, or `None` if it is not indexable.
#[inline]
pub fn symbol_index(ch: char) -> Option<usize> {
    match ch {
        'a'..='z' => Some(ch as usize - 'a' as usize),
        'A'..='Z' => Some(ch as usize - 'A' as usize),
        '0'..='9' => Some(ch as usize - '0' as usize + 26),
        _ => None,
    }
}

/// Map a child slot back to its (lowercase) character.
///
/// # Panics
///
/// Panics if `index >= ALPHABET_SIZE`.
#[inline]
pub fn symbol_char(index: usize) -> char {
    SYMBOLS[index] as char
}

/// Whether every character of `word` is indexable.
pub fn is_indexable(word: &str) -> bool {
    word.chars().all(|ch| symbol_index(ch).is_some())
}
