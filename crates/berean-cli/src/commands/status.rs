//! Status command

use anyhow::Result;
use berean_core::{Config, Store};

use crate::output::Output;

/// Show the data directory and per-collection record counts
pub fn show(store: &Store, config: &Config, output: &Output) -> Result<()> {
    let counts = store.counts()?;

    if output.is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "data_dir": config.data_dir,
                "database": config.sqlite_path(),
                "counts": counts,
            }))?
        );
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    println!("Data directory:    {}", config.data_dir.display());
    println!("Database:          {}", config.sqlite_path().display());
    println!();
    println!("English verses:    {}", counts.english_verses);
    println!("Telugu verses:     {}", counts.telugu_verses);
    println!("Notes:             {}", counts.notes);
    println!("Highlights:        {}", counts.highlights);
    println!("Verse links:       {}", counts.verse_links);
    println!("Drawings:          {}", counts.draw_notes);
    println!("Text annotations:  {}", counts.text_annotations);
    println!("Verse groups:      {}", counts.verse_groups);
    Ok(())
}
