//! Term matching policy
//!
//! Short terms are common substrings of ordinary words, so they only match a
//! whole identifier or comment. Longer terms match anywhere.

/// Terms with fewer characters than this only match by equality
pub const WHOLE_WORD_THRESHOLD: usize = 5;

/// Whether `text` contains the forbidden `term`
///
/// Comparison is case-insensitive (Unicode lowercase). Length is counted in
/// characters.
pub fn is_match(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    // measured before lowercasing, which can add characters
    let whole_word = term.chars().count() < WHOLE_WORD_THRESHOLD;
    let text = text.to_lowercase();
    let term = term.to_lowercase();

    if whole_word {
        text == term
    } else {
        text.contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_term_requires_whole_text() {
        assert!(is_match("fooo", "fooo"));
        assert!(is_match("FOOO", "fooo"));
        assert!(!is_match("xfoooy", "fooo"));
        assert!(!is_match("foo", "fooo"));
    }

    #[test]
    fn test_long_term_matches_substring() {
        assert!(is_match("MyWhitelistEntries", "whitelist"));
        assert!(is_match("WHITELIST", "whitelist"));
        assert!(is_match("/// Uses a white list of hosts", "white list"));
        assert!(!is_match("foo", "whitelist"));
        assert!(!is_match("White_Listing", "whitelist"));
    }

    #[test]
    fn test_threshold_counts_characters() {
        // four characters, eight bytes
        assert!(!is_match("xäöüßy", "äöüß"));
        assert!(is_match("ÄÖÜSS", "äöüss"));
        // five characters is already substring matching
        assert!(is_match("xfooooy", "foooo"));
    }

    #[test]
    fn test_threshold_uses_configured_term_length() {
        // 'İ' lowercases to two characters
        assert_eq!("İabc".chars().count(), 4);
        assert!(!is_match("xİabcy", "İabc"));
        assert!(is_match("İABC", "İabc"));
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(!is_match("", ""));
        assert!(!is_match("anything", ""));
    }
}
