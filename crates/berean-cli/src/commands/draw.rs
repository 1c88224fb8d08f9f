//! Drawing command handlers
//!
//! A drawing is captured from an image file and stored base64-encoded;
//! the core treats the payload as opaque.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use berean_core::{annotations, Store};
use uuid::Uuid;

use crate::commands::parse_ref;
use crate::output::Output;

/// Attach a drawing file to a verse
pub fn add(store: &mut Store, verse_ref: String, file: PathBuf, output: &Output) -> Result<()> {
    let verse_ref = parse_ref(&verse_ref)?;
    let bytes =
        std::fs::read(&file).with_context(|| format!("Failed to read drawing file {file:?}"))?;
    let data = STANDARD.encode(bytes);

    let draw_note = annotations::add_draw_note(store, &verse_ref, data)
        .context("Failed to add drawing")?;

    output.success(&format!(
        "Added drawing {} to {}",
        &draw_note.id.to_string()[..8],
        verse_ref
    ));
    if output.is_quiet() {
        println!("{}", draw_note.id);
    }
    Ok(())
}

/// List drawings on a verse
pub fn list(store: &Store, verse_ref: String, output: &Output) -> Result<()> {
    let verse_ref = parse_ref(&verse_ref)?;
    let draw_notes = store.draw_notes_for_verse(&verse_ref.to_string())?;
    output.print_draw_notes(&draw_notes);
    Ok(())
}

/// Remove a drawing
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let uuid = Uuid::parse_str(&id).with_context(|| format!("Invalid drawing ID: {id}"))?;
    if !annotations::remove_draw_note(store, uuid)? {
        bail!("No drawing found matching: {id}");
    }
    output.success(&format!("Removed drawing: {}", &id[..8.min(id.len())]));
    Ok(())
}
