//! Note command handlers

use anyhow::{bail, Context, Result};
use berean_core::{annotations, Store};
use uuid::Uuid;

use crate::commands::parse_ref;
use crate::output::Output;

/// Add a note to a verse
pub fn add(store: &mut Store, verse_ref: String, content: String, output: &Output) -> Result<()> {
    let verse_ref = parse_ref(&verse_ref)?;
    let note =
        annotations::add_note(store, &verse_ref, &content).context("Failed to add note")?;

    output.success(&format!(
        "Added note {} to {}",
        &note.id.to_string()[..8],
        verse_ref
    ));
    if output.is_quiet() {
        println!("{}", note.id);
    }
    Ok(())
}

/// List notes for one verse, or every note in the store
pub fn list(store: &Store, verse_ref: Option<String>, output: &Output) -> Result<()> {
    let notes = match verse_ref {
        Some(r) => {
            let r = parse_ref(&r)?;
            store.notes_for_verse(&r.to_string())?
        }
        None => store.all_notes()?,
    };
    output.print_notes(&notes);
    Ok(())
}

/// Delete a note by ID (full UUID or prefix)
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let note_id = resolve_note_id(store, &id)?;
    if !annotations::remove_note(store, note_id)? {
        bail!("No note found matching: {id}");
    }
    output.success(&format!("Deleted note: {}", &note_id.to_string()[..8]));
    Ok(())
}

/// Resolve a note ID from a full UUID or unique prefix
fn resolve_note_id(store: &Store, id: &str) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let notes = store.all_notes()?;
    let matches: Vec<_> = notes
        .iter()
        .filter(|n| n.id.to_string().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No note found matching: {id}"),
        1 => Ok(matches[0].id),
        _ => {
            eprintln!("Multiple notes match '{id}':");
            for note in &matches {
                eprintln!(
                    "  {} - {}",
                    &note.id.to_string()[..8],
                    crate::output::truncate(&note.content, 40)
                );
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
