//! Byte-bounded truncation that never splits a character, and grapheme
//! iteration for the typing effect.

use unicode_segmentation::UnicodeSegmentation;

/// Returns the largest char boundary of `s` not after byte `pos`.
///
/// # Examples
///
/// ```
/// use chatbot_rs::io::find_char_boundary;
///
/// let reply = "café!";
/// assert_eq!(find_char_boundary(reply, 3), 3);
/// assert_eq!(find_char_boundary(reply, 4), 3); // inside 'é'
/// ```
#[must_use]
pub const fn find_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut boundary = pos;
    // skip continuation bytes
    while boundary > 0 && (bytes[boundary] & 0xC0) == 0x80 {
        boundary -= 1;
    }
    boundary
}

/// Returns the longest prefix of `s` that fits in `max_bytes`.
///
/// A character straddling the limit is dropped entirely.
#[must_use]
pub fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    &s[..find_char_boundary(s, max_bytes)]
}

/// Splits text into user-perceived characters.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_char_boundary_ascii() {
        assert_eq!(find_char_boundary("hello", 3), 3);
        assert_eq!(find_char_boundary("hello", 10), 5);
        assert_eq!(find_char_boundary("", 0), 0);
    }

    #[test]
    fn test_find_char_boundary_multibyte() {
        let s = "a世b";
        assert_eq!(find_char_boundary(s, 1), 1);
        assert_eq!(find_char_boundary(s, 2), 1);
        assert_eq!(find_char_boundary(s, 3), 1);
        assert_eq!(find_char_boundary(s, 4), 4);
    }

    #[test]
    fn test_truncate_bytes() {
        assert_eq!(truncate_bytes("hello", 5), "hello");
        assert_eq!(truncate_bytes("hello", 4), "hell");
        assert_eq!(truncate_bytes("hello", 0), "");
        assert_eq!(truncate_bytes("héllo", 2), "h");
        assert_eq!(truncate_bytes("héllo", 3), "hé");
    }

    #[test]
    fn test_graphemes() {
        let parts: Vec<_> = graphemes("e\u{301}x").collect();
        assert_eq!(parts, vec!["e\u{301}", "x"]);
    }
}
