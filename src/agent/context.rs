/// Marker inserted where the middle of an over-long text was dropped.
pub const ELISION_MARKER: &str = "\n\n...(중략)...\n\n";

/// Bound `text` to roughly `limit` characters, keeping its opening and its end.
///
/// Text that already fits is returned unchanged. Otherwise the first 65% and
/// the last 35% of the budget are kept around [`ELISION_MARKER`]. Lengths are
/// counted in characters so multi-byte text is never split mid-character.
pub fn trim_context(text: &str, limit: usize) -> String {
    let len = text.chars().count();
    if len <= limit {
        return text.to_string();
    }

    let head_len = limit * 65 / 100;
    let tail_len = limit * 35 / 100;

    let head_end = text
        .char_indices()
        .nth(head_len)
        .map_or(text.len(), |(i, _)| i);
    let tail_start = if tail_len == 0 {
        text.len()
    } else {
        text.char_indices()
            .nth(len - tail_len)
            .map_or(text.len(), |(i, _)| i)
    };

    let mut out = String::with_capacity(head_end + ELISION_MARKER.len() + text.len() - tail_start);
    out.push_str(&text[..head_end]);
    out.push_str(ELISION_MARKER);
    out.push_str(&text[tail_start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(trim_context("hello", 5), "hello");
        assert_eq!(trim_context("", 0), "");
        assert_eq!(trim_context("짧은 글", 2500), "짧은 글");
    }

    #[test]
    fn test_long_text_keeps_head_and_tail() {
        let text: String = ('a'..='z').cycle().take(200).collect();
        let trimmed = trim_context(&text, 100);

        assert!(trimmed.starts_with(&text[..65]));
        assert!(trimmed.ends_with(&text[200 - 35..]));
        assert_eq!(trimmed.matches(ELISION_MARKER).count(), 1);
        assert_eq!(trimmed.chars().count(), 65 + 35 + ELISION_MARKER.chars().count());
    }

    #[test]
    fn test_multibyte_text_is_split_on_char_boundaries() {
        let text = "가".repeat(50) + &"나".repeat(50);
        let trimmed = trim_context(&text, 20);

        assert!(trimmed.starts_with(&"가".repeat(13)));
        assert!(trimmed.ends_with(&"나".repeat(7)));
        assert_eq!(trimmed.chars().count(), 13 + 7 + ELISION_MARKER.chars().count());
    }

    #[test]
    fn test_tiny_limit_stays_bounded() {
        let trimmed = trim_context("abcdef", 1);
        assert_eq!(trimmed, ELISION_MARKER);
    }
}
