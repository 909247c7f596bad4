//! Weight tables and the bundle-weight resolution rule

mod resolve;
mod table;

pub use resolve::resolve;
pub use table::{WeightEntry, WeightTable};

use regex::Regex;
use tracing::warn;

/// Returns true when `key` is a well-formed classification key.
///
/// Classification keys are machine names: lowercase ASCII letters, digits,
/// and underscores, one or more characters.
pub fn is_valid_key(key: &str) -> bool {
    let key_re = match Regex::new(r"^[a-z0-9_]+$") {
        Ok(re) => re,
        Err(e) => {
            warn!(error = %e, "Failed to compile machine name regex");
            return !key.is_empty(); // Accept anything non-empty if the regex fails
        }
    };
    key_re.is_match(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_machine_names() {
        assert!(is_valid_key("article"));
        assert!(is_valid_key("blog_post"));
        assert!(is_valid_key("tier_2"));
        assert!(is_valid_key("_"));
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("Article"));
        assert!(!is_valid_key("blog post"));
        assert!(!is_valid_key("café"));
        assert!(!is_valid_key("page-1"));
    }
}
