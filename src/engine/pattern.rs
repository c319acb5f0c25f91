//! Process-wide cache of compiled scalar-placeholder matchers
//!
//! The matcher for an attribute depends only on the attribute's name, never
//! on model state, so one compiled pattern serves every render in the
//! process, including concurrent ones. Entries are populated lazily on first
//! use of a name and never evicted.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use log::trace;
use regex::Regex;

static PATTERNS: LazyLock<RwLock<HashMap<String, Arc<Regex>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Get the compiled scalar-placeholder matcher for an attribute name.
///
/// Matches `||Name||` and `||Name:Spec||` where `Spec` is one or more
/// characters excluding `|`; the spec is capture group 1. First write wins:
/// concurrent callers racing to populate the same name may both compile, but
/// exactly one instance becomes the durable mapping and all callers receive
/// it.
pub fn scalar_pattern(name: &str) -> Arc<Regex> {
    {
        let cache = PATTERNS.read().expect("pattern cache lock poisoned");
        if let Some(pattern) = cache.get(name) {
            return Arc::clone(pattern);
        }
    }

    trace!("compiling scalar pattern for attribute '{}'", name);
    let compiled = Arc::new(compile(name));

    let mut cache = PATTERNS.write().expect("pattern cache lock poisoned");
    Arc::clone(cache.entry(name.to_string()).or_insert(compiled))
}

fn compile(name: &str) -> Regex {
    let pattern = format!(r"\|\|{}(?::([^|]+))?\|\|", regex::escape(name));
    Regex::new(&pattern).expect("escaped attribute name forms a valid pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_bare_placeholder() {
        let re = scalar_pattern("FirstName");
        let caps = re.captures("Hello ||FirstName||!").expect("Should match");
        assert_eq!(caps.get(0).unwrap().as_str(), "||FirstName||");
        assert!(caps.get(1).is_none());
    }

    #[test]
    fn test_matches_placeholder_with_spec() {
        let re = scalar_pattern("Amount");
        let caps = re.captures("total ||Amount:c2|| due").expect("Should match");
        assert_eq!(caps.get(1).unwrap().as_str(), "c2");
    }

    #[test]
    fn test_spec_cannot_contain_pipe() {
        let re = scalar_pattern("Value");
        // "|x" after the colon breaks the spec run, so only the bare form
        // beginning at the colon's closing bars could match, and it doesn't.
        assert!(!re.is_match("||Value:a|x||"));
    }

    #[test]
    fn test_does_not_match_other_names() {
        let re = scalar_pattern("Name");
        assert!(!re.is_match("||FirstName||"));
        assert!(!re.is_match("||NameSuffix||"));
    }

    #[test]
    fn test_repeated_lookup_returns_same_instance() {
        let a = scalar_pattern("CachedAttr");
        let b = scalar_pattern("CachedAttr");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_name_with_regex_metacharacters_is_escaped() {
        let re = scalar_pattern("A.B");
        assert!(re.is_match("||A.B||"));
        assert!(!re.is_match("||AxB||"));
    }
}
