//! Verse references
//!
//! A verse reference identifies exactly one verse as
//! `"Book:chapter:verse"`. Book names may contain spaces
//! (`"1 Samuel:2:3"`); chapter and verse are decimal integers with no
//! range constraints. Equality and store lookups are by the string
//! form, so formatting must stay canonical.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Grammar accepted at the boundary: letters and spaces for the book
/// name, colon-delimited decimal chapter and verse.
const REFERENCE_PATTERN: &str = r"^([A-Za-z ]+):(\d+):(\d+)$";

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REFERENCE_PATTERN).expect("reference pattern is valid"))
}

/// A parsed verse reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseRef {
    /// Book name, e.g. "Genesis" or "1 Samuel"
    pub book: String,
    /// Chapter number
    pub chapter: u32,
    /// Verse number
    pub verse: u32,
}

impl VerseRef {
    /// Build a reference from its parts
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }

    /// Parse a reference string against the boundary grammar
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let caps = reference_regex()
            .captures(input)
            .ok_or_else(|| ValidationError::InvalidReference(input.to_string()))?;

        // Chapter and verse are all-digit captures; values too large
        // for u32 are rejected as malformed rather than panicking.
        let chapter: u32 = caps[2]
            .parse()
            .map_err(|_| ValidationError::InvalidReference(input.to_string()))?;
        let verse: u32 = caps[3]
            .parse()
            .map_err(|_| ValidationError::InvalidReference(input.to_string()))?;

        Ok(Self {
            book: caps[1].to_string(),
            chapter,
            verse,
        })
    }

    /// True if the input matches the reference grammar
    pub fn is_valid(input: &str) -> bool {
        reference_regex().is_match(input)
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.book, self.chapter, self.verse)
    }
}

impl FromStr for VerseRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let r = VerseRef::parse("John:3:16").unwrap();
        assert_eq!(r.book, "John");
        assert_eq!(r.chapter, 3);
        assert_eq!(r.verse, 16);
    }

    #[test]
    fn test_parse_spaced_book_name() {
        let r = VerseRef::parse("1 Samuel:2:3").unwrap();
        assert_eq!(r.book, "1 Samuel");
        assert_eq!(r.chapter, 2);
        assert_eq!(r.verse, 3);
    }

    #[test]
    fn test_lowercase_book_accepted() {
        // [A-Za-z] accepts lowercase; the grammar does not enforce
        // canonical casing.
        assert!(VerseRef::is_valid("john:3:16"));
    }

    #[test]
    fn test_missing_colons_rejected() {
        assert!(!VerseRef::is_valid("John 3 16"));
        assert!(VerseRef::parse("John 3 16").is_err());
    }

    #[test]
    fn test_empty_and_partial_rejected() {
        assert!(VerseRef::parse("").is_err());
        assert!(VerseRef::parse("John:3").is_err());
        assert!(VerseRef::parse("John:3:16:1").is_err());
        assert!(VerseRef::parse(":3:16").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let r = VerseRef::new("Song of Solomon", 2, 1);
        let s = r.to_string();
        assert_eq!(s, "Song of Solomon:2:1");
        assert_eq!(VerseRef::parse(&s).unwrap(), r);
    }

    #[test]
    fn test_from_str() {
        let r: VerseRef = "Genesis:1:1".parse().unwrap();
        assert_eq!(r, VerseRef::new("Genesis", 1, 1));
    }
}
