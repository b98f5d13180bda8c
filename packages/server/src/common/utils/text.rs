/// Truncate to at most `length` characters, ending in `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text never splits a
/// code point.
pub fn truncate_text(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let keep = length.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_text("hello", 160), "hello");
    }

    #[test]
    fn exactly_at_limit_is_untouched() {
        let text = "a".repeat(160);
        assert_eq!(truncate_text(&text, 160), text);
    }

    #[test]
    fn long_text_is_cut_to_limit_with_ellipsis() {
        let text = "a".repeat(200);
        let truncated = truncate_text(&text, 160);
        assert_eq!(truncated.chars().count(), 160);
        assert!(truncated.ends_with("..."));
        assert_eq!(&truncated[..157], &text[..157]);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let text = "ü".repeat(10);
        assert_eq!(truncate_text(&text, 5), "üü...");
    }
}
