//! Verse grouping engine
//!
//! Partitions a chapter's verses into a linear sequence of single
//! verses and verse groups, and owns the group lifecycle: create or
//! update from a contiguous selection, shrink by member removal,
//! delete.
//!
//! Group membership is stored as verse-number strings; lookups here
//! compare strings, so callers must keep numeric and string forms
//! consistent.

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::models::{now_millis, Verse, VerseGroup};
use crate::store::Store;

/// One display unit of a partitioned chapter
#[derive(Debug, PartialEq)]
pub enum ChapterUnit<'a> {
    Single(&'a Verse),
    Group {
        group: &'a VerseGroup,
        /// The group's members that are actually present in the
        /// chapter, sorted by verse number
        verses: Vec<&'a Verse>,
    },
}

/// Partition a chapter's verses against its groups.
///
/// `verses` must be sorted ascending by verse number. Each verse is
/// emitted exactly once: as part of the first group claiming it, or as
/// a single unit. Group members are intersected with the present
/// verses and re-sorted, so a group referencing absent verses still
/// renders. Verses consumed by a group are tracked so a discontiguous
/// group (possible after member removal) cannot be emitted twice or
/// swallow the verses between its members.
pub fn partition<'a>(verses: &'a [Verse], groups: &'a [VerseGroup]) -> Vec<ChapterUnit<'a>> {
    let mut units = Vec::new();
    let mut consumed: HashSet<u32> = HashSet::new();

    for verse in verses {
        if consumed.contains(&verse.verse) {
            continue;
        }
        match groups.iter().find(|g| g.contains_verse(verse.verse)) {
            Some(group) => {
                let mut members: Vec<&Verse> = verses
                    .iter()
                    .filter(|v| group.contains_verse(v.verse))
                    .collect();
                members.sort_by_key(|v| v.verse);
                for member in &members {
                    consumed.insert(member.verse);
                }
                units.push(ChapterUnit::Group {
                    group,
                    verses: members,
                });
            }
            None => units.push(ChapterUnit::Single(verse)),
        }
    }

    units
}

/// True if `numbers` is a run with no gaps.
///
/// Precondition: `numbers` is sorted ascending. An unsorted run such
/// as `[5, 3, 4]` is reported as non-contiguous.
pub fn is_contiguous(numbers: &[u32]) -> bool {
    numbers.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Metadata shared by a group's members
#[derive(Debug, Clone, Default)]
pub struct GroupMeta {
    pub subheading: String,
    pub notes: String,
    pub border_color: String,
}

/// Create a group from a verse selection, or overwrite an existing one.
///
/// The selection is sorted before the contiguity check. Rejects empty
/// and non-contiguous selections before touching the store. On update
/// the original `created_at` is preserved; `updated_at` is always
/// stamped.
pub fn create_or_update_group(
    store: &mut Store,
    book_name: &str,
    chapter: u32,
    selection: &[u32],
    meta: GroupMeta,
    existing: Option<&VerseGroup>,
) -> Result<VerseGroup> {
    if selection.is_empty() {
        return Err(ValidationError::EmptySelection.into());
    }
    let mut sorted = selection.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if !is_contiguous(&sorted) {
        return Err(ValidationError::NonContiguousSelection.into());
    }

    let now = now_millis();
    let group = VerseGroup {
        id: existing.map(|g| g.id).unwrap_or_else(Uuid::new_v4),
        book_name: book_name.to_string(),
        chapter,
        verse_refs: sorted.iter().map(u32::to_string).collect(),
        subheading: meta.subheading,
        notes: meta.notes,
        border_color: meta.border_color,
        created_at: existing.map(|g| g.created_at).unwrap_or(now),
        updated_at: now,
    };

    store.put_group(&group)?;
    debug!(group = %group.id, book = book_name, chapter, "stored verse group");
    Ok(group)
}

/// Update only a group's notes, leaving membership untouched
pub fn update_group_notes(store: &mut Store, group_id: Uuid, notes: &str) -> Result<VerseGroup> {
    let mut group = store
        .get_group(group_id)?
        .ok_or_else(|| ValidationError::GroupNotFound(group_id.to_string()))?;
    group.notes = notes.to_string();
    group.updated_at = now_millis();
    store.put_group(&group)?;
    Ok(group)
}

/// Outcome of removing one member from a group
#[derive(Debug, PartialEq)]
pub enum MemberRemoval {
    /// The group shrank and was persisted
    Updated(VerseGroup),
    /// The last member was removed; the group was deleted
    Deleted,
}

/// Remove one verse from a group's membership.
///
/// Deletes the group when the last member goes. The remaining members
/// are NOT re-checked for contiguity - a gap left by an interior
/// removal is an accepted terminal state, logged as a warning.
pub fn remove_group_member(
    store: &mut Store,
    group_id: Uuid,
    verse_number: u32,
) -> Result<MemberRemoval> {
    let mut group = store
        .get_group(group_id)?
        .ok_or_else(|| ValidationError::GroupNotFound(group_id.to_string()))?;

    let needle = verse_number.to_string();
    group.verse_refs.retain(|r| r != &needle);

    if group.verse_refs.is_empty() {
        store.delete_group(group_id)?;
        debug!(group = %group_id, "deleted verse group after last member removed");
        return Ok(MemberRemoval::Deleted);
    }

    group.updated_at = now_millis();
    store.put_group(&group)?;

    let mut numbers = group.member_numbers();
    numbers.sort_unstable();
    if !is_contiguous(&numbers) {
        warn!(
            group = %group_id,
            members = ?group.verse_refs,
            "group is no longer contiguous after member removal"
        );
    }

    Ok(MemberRemoval::Updated(group))
}
