//! Grep-style predicates for [`ResultSet::filter`](crate::ResultSet::filter)
//!
//! Patterns are regular expressions searched anywhere in the field, the
//! same way `grep` treats its pattern. They are compiled once, when the
//! predicate is built.

use crate::entry::Entry;
use crate::error::Result;
use regex::Regex;

/// Keep entries whose command matches `pattern`
pub fn command_matches(pattern: &str) -> Result<impl Fn(usize, &Entry) -> bool + use<>> {
    let re = Regex::new(pattern)?;
    Ok(move |_: usize, entry: &Entry| re.is_match(&entry.command))
}

/// Keep entries whose location matches `pattern`
pub fn location_matches(pattern: &str) -> Result<impl Fn(usize, &Entry) -> bool + use<>> {
    let re = Regex::new(pattern)?;
    Ok(move |_: usize, entry: &Entry| re.is_match(&entry.location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_command_matches() {
        let matches = command_matches("tmp").unwrap();
        assert!(matches(0, &Entry::new("cd /tmp/hello", "/", Vec::new())));
        assert!(!matches(0, &Entry::new("vim", "/tmp", Vec::new())));
    }

    #[test]
    fn test_location_matches() {
        let matches = location_matches("^/tmp/b").unwrap();
        assert!(matches(0, &Entry::new("vim", "/tmp/bla", Vec::new())));
        assert!(!matches(0, &Entry::new("vim", "/tmp/hello", Vec::new())));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = command_matches("[unclosed").err().unwrap();
        assert!(matches!(err, Error::Regex(_)));
    }
}
