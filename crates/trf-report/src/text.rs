//! Text field limits

/// Clip a string to at most `max` characters. Over-long source text is
/// truncated silently, never rejected.
pub fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::clip;

    #[test]
    fn test_clip_counts_chars_not_bytes() {
        let s = "µ".repeat(30);
        assert_eq!(clip(&s, 20).chars().count(), 20);
    }

    #[test]
    fn test_clip_short_string_unchanged() {
        assert_eq!(clip("abc", 100), "abc");
        assert_eq!(clip("", 100), "");
    }
}
