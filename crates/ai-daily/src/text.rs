//! Small text helpers shared by the summarizer and the report formatter.

/// First `max` characters of `text`, respecting UTF-8 boundaries.
pub fn take_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Format an integer with `,` thousands separators (`1234567` -> `1,234,567`).
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_multibyte() {
        assert_eq!(take_chars("人工智能新闻", 4), "人工智能");
        assert_eq!(take_chars("abc", 10), "abc");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }
}
