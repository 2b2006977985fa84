use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Collapses whitespace runs (including newlines from pretty-printed HTML)
/// into single spaces.
pub fn normalize_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("Card reader\n      down at pump 2"),
            "Card reader down at pump 2"
        );
        assert_eq!(normalize_whitespace("already clean"), "already clean");
    }
}
