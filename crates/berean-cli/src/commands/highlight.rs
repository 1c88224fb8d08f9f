//! Highlight command handlers

use anyhow::{bail, Context, Result};
use berean_core::{annotations, Store};
use uuid::Uuid;

use crate::commands::parse_ref;
use crate::output::Output;

/// Highlight a verse in both language renderings
pub fn add(store: &mut Store, verse_ref: String, color: String, output: &Output) -> Result<()> {
    let verse_ref = parse_ref(&verse_ref)?;
    let pair = annotations::highlight_verse(store, &verse_ref, &color)
        .context("Failed to highlight verse")?;

    output.success(&format!("Highlighted {verse_ref} with {color} (English + Telugu)"));
    if output.is_quiet() {
        for highlight in &pair {
            println!("{}", highlight.id);
        }
    }
    Ok(())
}

/// List highlight records on a verse
pub fn list(store: &Store, verse_ref: String, output: &Output) -> Result<()> {
    let verse_ref = parse_ref(&verse_ref)?;
    let highlights = store.highlights_for_verse(&verse_ref.to_string())?;

    if output.is_json() {
        println!("{}", serde_json::to_string_pretty(&highlights)?);
        return Ok(());
    }
    if highlights.is_empty() {
        println!("No highlights found.");
        return Ok(());
    }
    for h in &highlights {
        println!(
            "{} | {} | {} ({})",
            &h.id.to_string()[..8],
            h.verse_ref,
            h.color,
            h.language
        );
    }
    Ok(())
}

/// Remove a single highlight record
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let uuid = Uuid::parse_str(&id).with_context(|| format!("Invalid highlight ID: {id}"))?;
    if !annotations::remove_highlight(store, uuid)? {
        bail!("No highlight found matching: {id}");
    }
    output.success(&format!("Removed highlight: {}", &id[..8.min(id.len())]));
    Ok(())
}
