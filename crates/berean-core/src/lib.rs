//! Berean Core Library
//!
//! This crate provides the core functionality for Berean, a local-first
//! Bible study tool: scripture corpora (English/Telugu), per-verse
//! annotations, and verse grouping, persisted in a local SQLite
//! database.
//!
//! # Architecture
//!
//! The [`Store`] is the sole source of truth. The segmentation and
//! grouping engines are pure functions over snapshots read from it;
//! the annotation lifecycle functions mutate it, after which callers
//! re-read. Derived views are recomputed, never patched.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open(&Config::load()?)?;
//!
//! // Annotate a verse
//! let verse_ref = VerseRef::parse("Genesis:1:3")?;
//! annotations::add_note(&mut store, &verse_ref, "Light before the sun")?;
//!
//! // Render a chapter
//! let verses = store.verses_for_chapter(Language::English, "Genesis", 1)?;
//! let groups = store.groups_for_chapter("Genesis", 1)?;
//! let units = grouping::partition(&verses, &groups);
//! ```
//!
//! # Modules
//!
//! - `store`: the annotation store (main entry point)
//! - `models`: verse, annotation, and group records
//! - `segment`: styled text segmentation for display
//! - `grouping`: chapter partitioning and the group lifecycle
//! - `annotations`: create/delete per annotation kind
//! - `import`: corpus JSON import
//! - `canon`: canonical book lists
//! - `navigation`: reference resolution and chapter movement
//! - `config`: application configuration

pub mod annotations;
pub mod canon;
pub mod config;
pub mod error;
pub mod grouping;
pub mod import;
pub mod models;
pub mod navigation;
pub mod reference;
pub mod segment;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, StoreError, ValidationError};
pub use grouping::{ChapterUnit, GroupMeta, MemberRemoval};
pub use import::ImportOutcome;
pub use models::{
    AnnotationStyle, DrawNote, Highlight, Language, Note, TextAnnotation, UnderlineType, Verse,
    VerseGroup, VerseLink,
};
pub use navigation::Location;
pub use reference::VerseRef;
pub use segment::{Segment, SegmentStyle};
pub use store::{Store, StoreCounts};
