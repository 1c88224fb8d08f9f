//! Annotation lifecycle
//!
//! One create and one delete operation per annotation kind. Every
//! create validates its input before touching the store, stamps both
//! timestamps, and persists in a single put (or one batch for the
//! highlight pair). A failed write leaves prior state intact; callers
//! must not update their own view before the store call returns.

use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::models::{
    now_millis, AnnotationStyle, DrawNote, Highlight, Language, Note, TextAnnotation, VerseLink,
};
use crate::reference::VerseRef;
use crate::store::Store;

/// Create a note on a verse. Content must be non-empty after trimming.
pub fn add_note(store: &mut Store, verse_ref: &VerseRef, content: &str) -> Result<Note> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyNote.into());
    }
    let note = Note::new(verse_ref, content);
    store.add_note(&note)?;
    debug!(verse = %verse_ref, note = %note.id, "added note");
    Ok(note)
}

/// Delete a note; returns false if it did not exist
pub fn remove_note(store: &mut Store, id: Uuid) -> Result<bool> {
    Ok(store.delete_note(id)?)
}

/// Highlight a verse in both language renderings.
///
/// Writes exactly two records (English and Telugu) in one batch,
/// sharing the color and timestamps and differing only in language.
pub fn highlight_verse(
    store: &mut Store,
    verse_ref: &VerseRef,
    color: &str,
) -> Result<[Highlight; 2]> {
    let now = now_millis();
    let pair = [
        Highlight::with_timestamps(verse_ref, color, Language::English, now, now),
        Highlight::with_timestamps(verse_ref, color, Language::Telugu, now, now),
    ];
    store.add_highlights(&pair)?;
    debug!(verse = %verse_ref, color, "highlighted verse");
    Ok(pair)
}

/// Delete a single highlight record; returns false if it did not exist
pub fn remove_highlight(store: &mut Store, id: Uuid) -> Result<bool> {
    Ok(store.delete_highlight(id)?)
}

/// Create a directed link from a verse to a target reference.
///
/// The target must match the reference grammar; it is not checked to
/// exist in any corpus.
pub fn add_verse_link(store: &mut Store, source: &VerseRef, target: &str) -> Result<VerseLink> {
    if !VerseRef::is_valid(target) {
        return Err(ValidationError::InvalidReference(target.to_string()).into());
    }
    let link = VerseLink::new(source, target);
    store.add_verse_link(&link)?;
    debug!(source = %source, target, "added verse link");
    Ok(link)
}

/// Delete a verse link; returns false if it did not exist
pub fn remove_verse_link(store: &mut Store, id: Uuid) -> Result<bool> {
    Ok(store.delete_verse_link(id)?)
}

/// Attach a drawing payload to a verse. The payload is opaque here.
pub fn add_draw_note(store: &mut Store, verse_ref: &VerseRef, data: String) -> Result<DrawNote> {
    let draw_note = DrawNote::new(verse_ref, data);
    store.add_draw_note(&draw_note)?;
    debug!(verse = %verse_ref, drawing = %draw_note.id, "added drawing");
    Ok(draw_note)
}

/// Delete a drawing; returns false if it did not exist
pub fn remove_draw_note(store: &mut Store, id: Uuid) -> Result<bool> {
    Ok(store.delete_draw_note(id)?)
}

/// Create a styled text-range annotation on one language's rendering
/// of a verse.
///
/// Requires `start < end`. A range overlapping an existing annotation
/// for the same verse and language is rejected, keeping the stored set
/// non-overlapping - the invariant the segmentation engine renders
/// under.
pub fn add_text_annotation(
    store: &mut Store,
    verse_ref: &VerseRef,
    language: Language,
    start: usize,
    end: usize,
    style: AnnotationStyle,
) -> Result<TextAnnotation> {
    if start >= end {
        return Err(ValidationError::EmptyRange { start, end }.into());
    }

    let existing = store.annotations_for_verse(&verse_ref.to_string())?;
    let overlaps = existing
        .iter()
        .filter(|a| a.language == language)
        .any(|a| a.start < end && start < a.end);
    if overlaps {
        return Err(ValidationError::OverlappingAnnotation { start, end }.into());
    }

    let annotation = TextAnnotation::new(verse_ref, start, end, style, language);
    store.add_text_annotation(&annotation)?;
    debug!(verse = %verse_ref, %language, start, end, "added text annotation");
    Ok(annotation)
}

/// Delete a text annotation; returns false if it did not exist
pub fn remove_text_annotation(store: &mut Store, id: Uuid) -> Result<bool> {
    Ok(store.delete_text_annotation(id)?)
}
