//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Result};
use berean_core::Config;

use crate::output::Output;

/// Show the current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    if output.is_json() {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file:     {}", Config::config_file_path().display());
    println!("data_dir:        {}", config.data_dir.display());
    println!(
        "english_corpus:  {}",
        config
            .english_corpus
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!(
        "telugu_corpus:   {}",
        config
            .telugu_corpus
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    Ok(())
}

/// Set a configuration value and save the config file
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key.as_str() {
        "data_dir" => config.data_dir = PathBuf::from(&value),
        "english_corpus" => config.english_corpus = Some(PathBuf::from(&value)),
        "telugu_corpus" => config.telugu_corpus = Some(PathBuf::from(&value)),
        _ => bail!("Unknown config key '{key}' (data_dir, english_corpus, telugu_corpus)"),
    }

    config.save()?;
    output.success(&format!("Set {key} = {value}"));
    Ok(())
}
