//! Formatting utilities.

/// Join verse lines into a single space-separated string.
pub fn join_lines(lines: &[String]) -> String {
    lines.join(" ")
}

/// Left-pad `value` to at least `len` characters with `fill`.
///
/// Values already at or beyond `len` are returned unchanged.
pub fn pad_start(value: impl std::fmt::Display, len: usize, fill: char) -> String {
    let s = value.to_string();
    let width = s.chars().count();
    if width >= len {
        return s;
    }
    let mut out: String = std::iter::repeat(fill).take(len - width).collect();
    out.push_str(&s);
    out
}

/// Take the first `max_chars` characters of `text` and append `...`.
///
/// The suffix is always appended, matching the preview line of search results.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines() {
        let lines = vec!["Estant assis".to_string(), "de nuict secret".to_string()];
        assert_eq!(join_lines(&lines), "Estant assis de nuict secret");
        assert_eq!(join_lines(&[]), "");
    }

    #[test]
    fn test_pad_start() {
        assert_eq!(pad_start(7, 3, '0'), "007");
        assert_eq!(pad_start(42, 3, '0'), "042");
        assert_eq!(pad_start(100, 3, '0'), "100");
        assert_eq!(pad_start(1234, 3, '0'), "1234");
        assert_eq!(pad_start("x", 3, '-'), "--x");
    }

    #[test]
    fn test_excerpt_short() {
        assert_eq!(excerpt("short", 100), "short...");
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        assert_eq!(excerpt("éàü and more", 3), "éàü...");
    }
}
