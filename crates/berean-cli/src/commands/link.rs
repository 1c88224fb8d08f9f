//! Verse link command handlers

use anyhow::{bail, Context, Result};
use berean_core::{annotations, Store};
use uuid::Uuid;

use crate::commands::parse_ref;
use crate::output::Output;

/// Link a verse to a target reference
pub fn add(store: &mut Store, source: String, target: String, output: &Output) -> Result<()> {
    let source = parse_ref(&source)?;
    let link = annotations::add_verse_link(store, &source, &target)
        .context("Failed to add verse link")?;

    output.success(&format!("Linked {} -> {}", source, link.target_ref));
    if output.is_quiet() {
        println!("{}", link.id);
    }
    Ok(())
}

/// List links from a verse
pub fn list(store: &Store, source: String, output: &Output) -> Result<()> {
    let source = parse_ref(&source)?;
    let links = store.links_from(&source.to_string())?;
    output.print_links(&links);
    Ok(())
}

/// Remove a verse link
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let uuid = Uuid::parse_str(&id).with_context(|| format!("Invalid link ID: {id}"))?;
    if !annotations::remove_verse_link(store, uuid)? {
        bail!("No link found matching: {id}");
    }
    output.success(&format!("Removed link: {}", &id[..8.min(id.len())]));
    Ok(())
}
