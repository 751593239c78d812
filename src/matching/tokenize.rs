//! Input tokenization.

/// Characters that separate tokens.
pub const SEPARATORS: &[char] = &[' ', '\t', '\r', '\n', ',', '.'];

/// Splits `input` on [`SEPARATORS`], skipping empty tokens.
///
/// # Examples
///
/// ```
/// use chatbot_rs::matching::tokens;
///
/// let words: Vec<_> = tokens("well, hi there.").collect();
/// assert_eq!(words, vec!["well", "hi", "there"]);
/// ```
pub fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input.split(SEPARATORS).filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hi", &["hi"]; "single word")]
    #[test_case("hi there", &["hi", "there"]; "space")]
    #[test_case("hi\tthere\r\n", &["hi", "there"]; "tab and line ending")]
    #[test_case("one,two.three", &["one", "two", "three"]; "punctuation")]
    #[test_case("  ,. ", &[]; "only separators")]
    #[test_case("", &[]; "empty")]
    #[test_case("what? why!", &["what?", "why!"]; "other punctuation kept")]
    fn test_tokens(input: &str, expected: &[&str]) {
        assert_eq!(tokens(input).collect::<Vec<_>>(), expected);
    }
}
