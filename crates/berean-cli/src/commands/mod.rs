//! CLI command handlers

pub mod annotate;
pub mod config;
pub mod draw;
pub mod group;
pub mod highlight;
pub mod import;
pub mod link;
pub mod note;
pub mod read;
pub mod status;

use anyhow::{bail, Result};
use berean_core::{Language, VerseRef};

/// Parse a user-supplied verse reference, with a friendly error
pub fn parse_ref(input: &str) -> Result<VerseRef> {
    VerseRef::parse(input).map_err(|e| anyhow::anyhow!(e))
}

/// Parse a user-supplied language name
pub fn parse_language(input: &str) -> Result<Language> {
    match Language::parse(input) {
        Some(language) => Ok(language),
        None => bail!("Unknown language '{input}' (expected english or telugu)"),
    }
}
