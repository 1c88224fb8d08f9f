//! Verse group command handlers

use anyhow::{bail, Context, Result};
use berean_core::{grouping, GroupMeta, MemberRemoval, Store};
use uuid::Uuid;

use crate::output::{verse_range, Output};

/// Create a group from a verse selection, or overwrite an existing one
#[allow(clippy::too_many_arguments)]
pub fn create(
    store: &mut Store,
    book: String,
    chapter: u32,
    verses: Vec<u32>,
    subheading: Option<String>,
    notes: Option<String>,
    color: Option<String>,
    edit: Option<String>,
    output: &Output,
) -> Result<()> {
    let existing = match edit {
        Some(id) => {
            let uuid = resolve_group_id(store, &book, chapter, &id)?;
            Some(
                store
                    .get_group(uuid)?
                    .ok_or_else(|| anyhow::anyhow!("Verse group not found: {id}"))?,
            )
        }
        None => None,
    };

    let meta = GroupMeta {
        subheading: subheading
            .or_else(|| existing.as_ref().map(|g| g.subheading.clone()))
            .unwrap_or_default(),
        notes: notes
            .or_else(|| existing.as_ref().map(|g| g.notes.clone()))
            .unwrap_or_default(),
        border_color: color
            .or_else(|| existing.as_ref().map(|g| g.border_color.clone()))
            .unwrap_or_else(|| "#FF0000".to_string()),
    };

    let group =
        grouping::create_or_update_group(store, &book, chapter, &verses, meta, existing.as_ref())?;

    output.success(&format!(
        "Grouped {} {} verses {} as {}",
        book,
        chapter,
        verse_range(&group),
        &group.id.to_string()[..8]
    ));
    if output.is_quiet() {
        println!("{}", group.id);
    }
    Ok(())
}

/// List groups in a chapter
pub fn list(store: &Store, book: String, chapter: u32, output: &Output) -> Result<()> {
    let groups = store.groups_for_chapter(&book, chapter)?;
    output.print_groups(&groups);
    Ok(())
}

/// Replace a group's notes
pub fn edit_notes(store: &mut Store, id: String, notes: String, output: &Output) -> Result<()> {
    let uuid = Uuid::parse_str(&id).with_context(|| format!("Invalid group ID: {id}"))?;
    let group = grouping::update_group_notes(store, uuid, &notes)
        .context("Failed to update group notes")?;
    output.success(&format!("Updated notes for group {}", &group.id.to_string()[..8]));
    Ok(())
}

/// Remove one verse from a group's membership
pub fn remove_verse(store: &mut Store, id: String, verse: u32, output: &Output) -> Result<()> {
    let uuid = Uuid::parse_str(&id).with_context(|| format!("Invalid group ID: {id}"))?;
    match grouping::remove_group_member(store, uuid, verse)? {
        MemberRemoval::Updated(group) => {
            output.success(&format!(
                "Removed verse {verse}; group now covers verses {}",
                group.verse_refs.join(", ")
            ));
        }
        MemberRemoval::Deleted => {
            output.success(&format!("Removed verse {verse}; group deleted (no members left)"));
        }
    }
    Ok(())
}

/// Delete a group outright
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let uuid = Uuid::parse_str(&id).with_context(|| format!("Invalid group ID: {id}"))?;
    if !store.delete_group(uuid)? {
        bail!("No verse group found matching: {id}");
    }
    output.success(&format!("Deleted group: {}", &id[..8.min(id.len())]));
    Ok(())
}

/// Resolve a group ID from a full UUID or a prefix unique within the
/// given chapter
fn resolve_group_id(store: &Store, book: &str, chapter: u32, id: &str) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let groups = store.groups_for_chapter(book, chapter)?;
    let matches: Vec<_> = groups
        .iter()
        .filter(|g| g.id.to_string().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No verse group found matching: {id}"),
        1 => Ok(matches[0].id),
        _ => bail!("Ambiguous group ID '{id}'. Please provide more characters."),
    }
}
