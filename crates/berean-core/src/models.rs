//! Data models for Berean
//!
//! Verse text records and the five annotation kinds that attach to
//! them, plus verse groups. Annotation records are independent rows
//! scoped to a verse reference string; the store does not relate them
//! to each other.
//!
//! Timestamps are milliseconds since the Unix epoch, matching the
//! persisted representation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reference::VerseRef;

/// Current time in milliseconds since epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Language corpus a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Telugu,
}

impl Language {
    /// Both corpora, in the order highlight pairs are written
    pub const ALL: [Language; 2] = [Language::English, Language::Telugu];

    /// Stable name used in the database and CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Telugu => "Telugu",
        }
    }

    /// Parse a stored or user-supplied language name
    pub fn parse(s: &str) -> Option<Language> {
        match s {
            _ if s.eq_ignore_ascii_case("english") || s.eq_ignore_ascii_case("en") => {
                Some(Language::English)
            }
            _ if s.eq_ignore_ascii_case("telugu") || s.eq_ignore_ascii_case("te") => {
                Some(Language::Telugu)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One verse of scripture text, imported once and never edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Book name, e.g. "Genesis"
    pub book_name: String,
    /// Book ordinal within the corpus file
    pub book: u32,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl Verse {
    /// The canonical reference string for this verse
    pub fn reference(&self) -> VerseRef {
        VerseRef::new(self.book_name.clone(), self.chapter, self.verse)
    }
}

/// A free-text note attached to a verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub verse_ref: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    pub fn new(verse_ref: &VerseRef, content: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            verse_ref: verse_ref.to_string(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A whole-verse background highlight for one language rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: Uuid,
    pub verse_ref: String,
    /// Hex color, e.g. "#FFFF00"
    pub color: String,
    pub language: Language,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Highlight {
    pub fn new(verse_ref: &VerseRef, color: impl Into<String>, language: Language) -> Self {
        let now = now_millis();
        Self::with_timestamps(verse_ref, color, language, now, now)
    }

    /// Build a highlight with explicit timestamps. Highlight pairs
    /// written by one action share the same stamps.
    pub fn with_timestamps(
        verse_ref: &VerseRef,
        color: impl Into<String>,
        language: Language,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            verse_ref: verse_ref.to_string(),
            color: color.into(),
            language,
            created_at,
            updated_at,
        }
    }
}

/// Underline variants for styled text ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlineType {
    Solid,
    Dotted,
    Dashed,
    Wavy,
}

impl UnderlineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnderlineType::Solid => "solid",
            UnderlineType::Dotted => "dotted",
            UnderlineType::Dashed => "dashed",
            UnderlineType::Wavy => "wavy",
        }
    }
}

/// Styling applied to an annotated text range
///
/// Every field is optional: `None` means "not set, inherit the plain
/// rendering", which is distinct from an explicit value such as
/// `bold: Some(false)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    /// Text color as a hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<UnderlineType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// A styled range of a verse's text in one language
///
/// `start` and `end` are UTF-16 code-unit offsets into the verse text,
/// with `start < end`. Ranges for the same verse and language are
/// expected to be non-overlapping once sorted by `start`; the
/// segmentation engine tolerates violations without crashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub id: Uuid,
    pub verse_ref: String,
    pub start: usize,
    pub end: usize,
    pub style: AnnotationStyle,
    pub language: Language,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TextAnnotation {
    pub fn new(
        verse_ref: &VerseRef,
        start: usize,
        end: usize,
        style: AnnotationStyle,
        language: Language,
    ) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            verse_ref: verse_ref.to_string(),
            start,
            end,
            style,
            language,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A directed cross-reference from one verse to another
///
/// The target is validated against the reference grammar at creation
/// but not checked for existence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseLink {
    pub id: Uuid,
    pub source_ref: String,
    pub target_ref: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl VerseLink {
    pub fn new(source_ref: &VerseRef, target_ref: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            source_ref: source_ref.to_string(),
            target_ref: target_ref.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A freehand drawing attached to a verse, stored as an opaque payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawNote {
    pub id: Uuid,
    pub verse_ref: String,
    /// Opaque encoded image payload; never interpreted by the core
    pub data: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DrawNote {
    pub fn new(verse_ref: &VerseRef, data: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            verse_ref: verse_ref.to_string(),
            data: data.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A run of verses in one chapter displayed as a unit
///
/// `verse_refs` holds verse numbers as strings, ordered ascending.
/// Contiguity is enforced when a group is created or fully edited, but
/// not re-checked when a member is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseGroup {
    pub id: Uuid,
    pub book_name: String,
    pub chapter: u32,
    pub verse_refs: Vec<String>,
    pub subheading: String,
    pub notes: String,
    /// Hex border color, e.g. "#FF0000"
    pub border_color: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl VerseGroup {
    /// True if the group's membership contains this verse number
    pub fn contains_verse(&self, verse: u32) -> bool {
        let needle = verse.to_string();
        self.verse_refs.iter().any(|r| r == &needle)
    }

    /// Member verse numbers parsed back to integers, in stored order.
    /// Unparseable entries are skipped.
    pub fn member_numbers(&self) -> Vec<u32> {
        self.verse_refs
            .iter()
            .filter_map(|r| r.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("English"), Some(Language::English));
        assert_eq!(Language::parse("te"), Some(Language::Telugu));
        assert_eq!(Language::parse("greek"), None);
    }

    #[test]
    fn test_note_new() {
        let r = VerseRef::new("Genesis", 1, 1);
        let note = Note::new(&r, "In the beginning");
        assert_eq!(note.verse_ref, "Genesis:1:1");
        assert_eq!(note.content, "In the beginning");
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_highlight_pair_share_timestamps() {
        let r = VerseRef::new("John", 3, 16);
        let now = now_millis();
        let en = Highlight::with_timestamps(&r, "#FFFF00", Language::English, now, now);
        let te = Highlight::with_timestamps(&r, "#FFFF00", Language::Telugu, now, now);
        assert_eq!(en.created_at, te.created_at);
        assert_eq!(en.color, te.color);
        assert_ne!(en.id, te.id);
    }

    #[test]
    fn test_annotation_style_unset_vs_default() {
        let unset = AnnotationStyle::default();
        assert!(unset.bold.is_none());

        let explicit = AnnotationStyle {
            bold: Some(false),
            ..Default::default()
        };
        assert_ne!(unset, explicit);
    }

    #[test]
    fn test_style_serialization_skips_unset() {
        let style = AnnotationStyle {
            color: Some("#FF0000".to_string()),
            underline: Some(UnderlineType::Wavy),
            ..Default::default()
        };
        let json = serde_json::to_string(&style).unwrap();
        assert!(json.contains("wavy"));
        assert!(!json.contains("bold"));

        let back: AnnotationStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }

    #[test]
    fn test_group_contains_verse_by_string() {
        let group = VerseGroup {
            id: Uuid::new_v4(),
            book_name: "Genesis".to_string(),
            chapter: 1,
            verse_refs: vec!["3".to_string(), "4".to_string(), "5".to_string()],
            subheading: String::new(),
            notes: String::new(),
            border_color: "#FF0000".to_string(),
            created_at: 0,
            updated_at: 0,
        };
        assert!(group.contains_verse(4));
        assert!(!group.contains_verse(6));
        assert_eq!(group.member_numbers(), vec![3, 4, 5]);
    }

    #[test]
    fn test_verse_reference() {
        let verse = Verse {
            book_name: "1 Samuel".to_string(),
            book: 9,
            chapter: 2,
            verse: 3,
            text: "Talk no more so exceeding proudly".to_string(),
        };
        assert_eq!(verse.reference().to_string(), "1 Samuel:2:3");
    }
}
