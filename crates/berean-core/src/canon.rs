//! The biblical canon
//!
//! Canonical book lists and ordering. The display order of books never
//! depends on what happens to be imported; a corpus is validated
//! against the canon and discrepancies are logged, never repaired.

use tracing::warn;

use crate::error::Result;
use crate::models::Language;
use crate::store::Store;

/// Old Testament books in canonical order
pub const OLD_TESTAMENT: [&str; 39] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
];

/// New Testament books in canonical order
pub const NEW_TESTAMENT: [&str; 27] = [
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// All 66 books in canonical order
pub fn all_books() -> impl Iterator<Item = &'static str> {
    OLD_TESTAMENT.iter().chain(NEW_TESTAMENT.iter()).copied()
}

/// Position of a book in the canon, if it is canonical
pub fn book_index(name: &str) -> Option<usize> {
    all_books().position(|b| b == name)
}

/// True if the name is a canonical book
pub fn is_canonical(name: &str) -> bool {
    book_index(name).is_some()
}

/// The canonical book list, validated against what a corpus actually
/// contains.
///
/// Always returns the full canon in order; canonical books missing
/// from the store and non-canonical books present in it are logged as
/// warnings only.
pub fn books(store: &Store, language: Language) -> Result<Vec<&'static str>> {
    let present = store.books_present(language)?;

    let missing: Vec<&str> = all_books().filter(|b| !present.iter().any(|p| p == b)).collect();
    if !missing.is_empty() {
        warn!(%language, count = missing.len(), ?missing, "canonical books missing from corpus");
    }

    let extra: Vec<&String> = present.iter().filter(|p| !is_canonical(p)).collect();
    if !extra.is_empty() {
        warn!(%language, ?extra, "non-canonical books present in corpus");
    }

    Ok(all_books().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verse;

    #[test]
    fn test_canon_size_and_order() {
        let books: Vec<_> = all_books().collect();
        assert_eq!(books.len(), 66);
        assert_eq!(books[0], "Genesis");
        assert_eq!(books[38], "Malachi");
        assert_eq!(books[39], "Matthew");
        assert_eq!(books[65], "Revelation");
    }

    #[test]
    fn test_book_index() {
        assert_eq!(book_index("Genesis"), Some(0));
        assert_eq!(book_index("John"), Some(42));
        assert_eq!(book_index("Gospel of Thomas"), None);
        assert!(is_canonical("1 Samuel"));
    }

    #[test]
    fn test_books_returns_canon_despite_gaps() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_verses(
                Language::English,
                &[Verse {
                    book_name: "Genesis".to_string(),
                    book: 1,
                    chapter: 1,
                    verse: 1,
                    text: "In the beginning".to_string(),
                }],
            )
            .unwrap();

        // Only one book imported; the full canon still comes back.
        let books = books(&store, Language::English).unwrap();
        assert_eq!(books.len(), 66);
    }
}
