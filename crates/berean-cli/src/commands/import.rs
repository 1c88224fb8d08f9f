//! Corpus import command

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use berean_core::{import, Config, Store};

use crate::commands::parse_language;
use crate::output::Output;

/// Import a corpus file for one language.
///
/// Falls back to the configured corpus path when no file is given.
pub fn run(
    store: &mut Store,
    config: &Config,
    language: String,
    file: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let language = parse_language(&language)?;

    let path = match file.or_else(|| config.corpus_path(language).cloned()) {
        Some(path) => path,
        None => bail!(
            "No corpus file given and none configured. Set one with: \
             berean config set {}_corpus <path>",
            language.to_string().to_lowercase()
        ),
    };

    let outcome = import::import_corpus(store, language, &path)
        .with_context(|| format!("Failed to import {language} corpus from {path:?}"))?;

    if output.is_json() {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if outcome.skipped {
        output.success(&format!("{language} corpus already imported, skipped."));
    } else {
        output.success(&format!(
            "Imported {} {language} verses from {}",
            outcome.imported,
            path.display()
        ));
        if outcome.missing_book_names > 0 {
            output.success(&format!(
                "Warning: {} verse(s) had no book name",
                outcome.missing_book_names
            ));
        }
    }
    Ok(())
}
