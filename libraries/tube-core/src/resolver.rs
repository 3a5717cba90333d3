//! Identity resolver
//!
//! Extracts the 11-character item token from the two supported link shapes:
//! - short host: `https://youtu.be/<token>`
//! - watch link: `https://www.youtube.com/watch?v=<token>` (`v` may be any
//!   query parameter position)
//!
//! Extraction is case-sensitive and the first match in the string wins.

use crate::error::{Result, TubeError};
use crate::types::ItemId;
use once_cell::sync::Lazy;
use regex::Regex;

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[?&]v=|youtu\.be/)([a-zA-Z0-9_-]{11})").expect("link pattern is valid")
});

/// Resolve a pasted link into an item id, or `None` if no token is present
pub fn resolve(link: &str) -> Option<ItemId> {
    LINK_PATTERN
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| ItemId::new(m.as_str()))
}

/// Resolve a pasted link, reporting `TubeError::InvalidLink` on failure
pub fn resolve_link(link: &str) -> Result<ItemId> {
    resolve(link).ok_or_else(|| TubeError::invalid_link(link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn resolves_watch_link() {
        let id = resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn resolves_short_link() {
        let id = resolve("https://youtu.be/dQw4w9WgXcQ?si=tracking").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn resolves_v_in_later_query_position() {
        let id = resolve("https://www.youtube.com/watch?list=PL123&v=a_b-C1d2E3f").unwrap();
        assert_eq!(id.as_str(), "a_b-C1d2E3f");
    }

    #[test]
    fn first_match_wins() {
        let id = resolve("https://youtu.be/AAAAAAAAAAA?v=BBBBBBBBBBB").unwrap();
        assert_eq!(id.as_str(), "AAAAAAAAAAA");
    }

    #[test]
    fn rejects_other_inputs() {
        assert!(resolve("").is_none());
        assert!(resolve("https://vimeo.com/123456789").is_none());
        assert!(resolve("https://youtu.be/short").is_none());
        assert!(resolve("https://www.youtube.com/watch?list=PL123").is_none());
        assert!(resolve("https://example.com/?nov=dQw4w9WgXcQ").is_none());
    }

    #[test]
    fn extraction_is_case_sensitive() {
        assert!(resolve("https://YOUTU.BE/dQw4w9WgXcQ").is_none());
        let id = resolve("https://youtu.be/DQW4W9WGXCQ").unwrap();
        assert_eq!(id.as_str(), "DQW4W9WGXCQ");
    }

    #[test]
    fn resolve_link_reports_invalid_link() {
        match resolve_link("not a link") {
            Err(TubeError::InvalidLink(link)) => assert_eq!(link, "not a link"),
            other => panic!("Expected InvalidLink, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn extracts_token_from_both_shapes(token in "[a-zA-Z0-9_-]{11}") {
            let watch = format!("https://www.youtube.com/watch?v={}", token);
            let short = format!("https://youtu.be/{}", token);

            prop_assert_eq!(resolve(&watch).map(|id| id.as_str().to_string()), Some(token.clone()));
            prop_assert_eq!(resolve(&short).map(|id| id.as_str().to_string()), Some(token));
        }

        #[test]
        fn strings_without_a_link_marker_never_resolve(input in "[a-zA-Z0-9 /:.]{0,40}") {
            prop_assume!(!input.contains("youtu.be/"));
            prop_assert!(resolve(&input).is_none());
        }
    }
}
