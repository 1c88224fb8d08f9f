//! Corpus import
//!
//! Reads a language corpus from a JSON file of the shape
//! `{ "verses": [ { book_name, book, chapter, verse, text }, ... ] }`
//! and bulk-loads it into the store.
//!
//! Import is all-or-nothing per corpus: a file that does not parse to
//! the expected top-level shape aborts without writing anything, and
//! the batch itself runs in one transaction. Individual verses with a
//! missing or empty `book_name` are logged as warnings but imported
//! anyway. A corpus that already has rows is skipped entirely, which
//! makes startup import idempotent.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::models::{Language, Verse};
use crate::store::Store;

/// Raw verse record as it appears in a corpus file
#[derive(Debug, Deserialize)]
struct RawVerse {
    #[serde(default)]
    book_name: String,
    #[serde(default)]
    book: u32,
    chapter: u32,
    verse: u32,
    text: String,
}

/// Top-level corpus file shape
#[derive(Debug, Deserialize)]
struct CorpusFile {
    verses: Vec<RawVerse>,
}

/// What an import call did
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImportOutcome {
    /// Number of verses written
    pub imported: usize,
    /// True if the corpus was already populated and nothing was read
    pub skipped: bool,
    /// Number of records imported despite a missing book name
    pub missing_book_names: usize,
}

/// Import a corpus file into the store
pub fn import_corpus(store: &mut Store, language: Language, path: &Path) -> Result<ImportOutcome> {
    if store.corpus_count(language)? > 0 {
        info!(%language, "corpus already populated, skipping import");
        return Ok(ImportOutcome {
            imported: 0,
            skipped: true,
            missing_book_names: 0,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    import_corpus_from_str(store, language, &content, path)
}

/// Import a corpus from already-read JSON content.
///
/// `path` is used only for error reporting.
fn import_corpus_from_str(
    store: &mut Store,
    language: Language,
    content: &str,
    path: &Path,
) -> Result<ImportOutcome> {
    let corpus: CorpusFile =
        serde_json::from_str(content).map_err(|e| StoreError::InvalidCorpus {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    let mut missing_book_names = 0usize;
    let verses: Vec<Verse> = corpus
        .verses
        .into_iter()
        .map(|raw| {
            if raw.book_name.trim().is_empty() {
                missing_book_names += 1;
                warn!(
                    chapter = raw.chapter,
                    verse = raw.verse,
                    "imported verse has no book name"
                );
            }
            Verse {
                book_name: raw.book_name,
                book: raw.book,
                chapter: raw.chapter,
                verse: raw.verse,
                text: raw.text,
            }
        })
        .collect();

    let imported = store.insert_verses(language, &verses)?;
    info!(%language, imported, "corpus import complete");

    Ok(ImportOutcome {
        imported,
        skipped: false,
        missing_book_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "verses": [
            {"book_name": "Genesis", "book": 1, "chapter": 1, "verse": 1,
             "text": "In the beginning God created the heaven and the earth."},
            {"book_name": "Genesis", "book": 1, "chapter": 1, "verse": 2,
             "text": "And the earth was without form, and void."}
        ]
    }"#;

    fn write_corpus(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_import_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_corpus(&dir, "asv.json", SAMPLE);
        let mut store = Store::open_in_memory().unwrap();

        let outcome = import_corpus(&mut store, Language::English, &path).unwrap();
        assert_eq!(outcome.imported, 2);
        assert!(!outcome.skipped);
        assert_eq!(outcome.missing_book_names, 0);
        assert_eq!(store.corpus_count(Language::English).unwrap(), 2);
    }

    #[test]
    fn test_import_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_corpus(&dir, "asv.json", SAMPLE);
        let mut store = Store::open_in_memory().unwrap();

        import_corpus(&mut store, Language::English, &path).unwrap();
        let second = import_corpus(&mut store, Language::English, &path).unwrap();
        assert!(second.skipped);
        assert_eq!(store.corpus_count(Language::English).unwrap(), 2);

        // The other corpus is independent
        let telugu = import_corpus(&mut store, Language::Telugu, &path).unwrap();
        assert!(!telugu.skipped);
    }

    #[test]
    fn test_malformed_top_level_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_corpus(&dir, "bad.json", r#"{"wrong": []}"#);
        let mut store = Store::open_in_memory().unwrap();

        let err = import_corpus(&mut store, Language::English, &path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Store(StoreError::InvalidCorpus { .. })
        ));
        assert_eq!(store.corpus_count(Language::English).unwrap(), 0);
    }

    #[test]
    fn test_missing_book_name_warned_but_imported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_corpus(
            &dir,
            "partial.json",
            r#"{"verses": [
                {"chapter": 1, "verse": 1, "text": "orphan verse"},
                {"book_name": "Genesis", "book": 1, "chapter": 1, "verse": 2, "text": "ok"}
            ]}"#,
        );
        let mut store = Store::open_in_memory().unwrap();

        let outcome = import_corpus(&mut store, Language::English, &path).unwrap();
        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.missing_book_names, 1);
        assert_eq!(store.corpus_count(Language::English).unwrap(), 2);
    }

    #[test]
    fn test_missing_file() {
        let mut store = Store::open_in_memory().unwrap();
        let err = import_corpus(
            &mut store,
            Language::English,
            Path::new("/nonexistent/asv.json"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Store(StoreError::ReadError { .. })
        ));
    }
}
