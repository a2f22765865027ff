//! Text normalization shared by corpus loading and query handling.
//!
//! Everything except ASCII letters, digits and whitespace is dropped, the
//! rest is lowercased and trimmed. The output therefore only ever contains
//! indexable symbols separated by whitespace.
//!
//! Every ASCII whitespace character survives, not just space and tab: line
//! feed, carriage return and form feed are kept as well. [`tokenize`]
//! splits on all of them, so the extra kinds never reach the index.

/// Normalize a line of text.
///
/// Interior whitespace is kept as is, including `\n`, `\r` and `\x0C`.
///
/// ```
/// use phrase_complete::corpus::normalize;
///
/// assert_eq!(normalize("  Hello, World!  "), "hello world");
/// assert_eq!(normalize("don't-stop"), "dontstop");
/// ```
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || ch.is_ascii_whitespace())
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    cleaned.trim().to_string()
}

/// Normalize a line, discarding it if nothing indexable survives.
pub fn normalize_line(text: &str) -> Option<String> {
    let line = normalize(text);
    (!line.is_empty()).then_some(line)
}

/// Split a normalized line into words.
#[inline]
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_ascii_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::alphabet::is_indexable;

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        assert_eq!(normalize("The Cat, sat."), "the cat sat");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(normalize("Python 3.11"), "python 311");
    }

    #[test]
    fn test_drops_non_ascii_letters() {
        assert_eq!(normalize("café crème"), "caf crme");
    }

    #[test]
    fn test_blank_lines_are_discarded() {
        assert_eq!(normalize_line("   "), None);
        assert_eq!(normalize_line("--- ..."), None);
        assert_eq!(normalize_line("\t\r\n"), None);
        assert_eq!(normalize_line(" ok "), Some("ok".to_string()));
    }

    #[test]
    fn test_internal_whitespace_is_preserved_but_tokenized_away() {
        let line = normalize("a \t b   c");
        assert_eq!(line, "a \t b   c");
        assert_eq!(tokenize(&line).collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_other_ascii_whitespace_is_kept() {
        let line = normalize("a\rb\nc\x0Cd");
        assert_eq!(line, "a\rb\nc\x0Cd");
        assert_eq!(tokenize(&line).collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_tokens_are_indexable() {
        let line = normalize("Hello, wörld! It's 2024 -- (really).");
        assert!(tokenize(&line).all(is_indexable));
    }
}
