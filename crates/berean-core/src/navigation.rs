//! Reference navigation
//!
//! Resolves user-entered references and moves between chapters. Moving
//! past the last chapter of a book continues into the next canonical
//! book; the ends of the canon wrap around.

use crate::canon;
use crate::error::{Result, ValidationError};
use crate::models::Language;
use crate::reference::VerseRef;
use crate::store::Store;

/// A reading position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub book: String,
    pub chapter: u32,
}

/// Resolve a reference string to a reading position.
///
/// Fails on grammar violations and on books outside the canon; the
/// chapter is not checked against the corpus (an absent chapter simply
/// renders empty).
pub fn resolve(reference: &str) -> Result<VerseRef> {
    let parsed = VerseRef::parse(reference)?;
    if !canon::is_canonical(&parsed.book) {
        return Err(ValidationError::UnknownBook(parsed.book).into());
    }
    Ok(parsed)
}

/// The chapter after the given position, crossing into the next book
/// at the end of the current one and wrapping at the end of the canon.
pub fn next_chapter(
    store: &Store,
    language: Language,
    book: &str,
    chapter: u32,
) -> Result<Location> {
    let index =
        canon::book_index(book).ok_or_else(|| ValidationError::UnknownBook(book.to_string()))?;
    let books: Vec<&str> = canon::all_books().collect();

    let max_chapter = store
        .chapters(language, book)?
        .last()
        .copied()
        .unwrap_or(1);

    if chapter < max_chapter {
        return Ok(Location {
            book: book.to_string(),
            chapter: chapter + 1,
        });
    }

    let next_book = if index + 1 < books.len() {
        books[index + 1]
    } else {
        books[0]
    };
    Ok(Location {
        book: next_book.to_string(),
        chapter: 1,
    })
}

/// The chapter before the given position, crossing into the previous
/// book's last chapter and wrapping at the start of the canon.
pub fn previous_chapter(
    store: &Store,
    language: Language,
    book: &str,
    chapter: u32,
) -> Result<Location> {
    let index =
        canon::book_index(book).ok_or_else(|| ValidationError::UnknownBook(book.to_string()))?;
    let books: Vec<&str> = canon::all_books().collect();

    if chapter > 1 {
        return Ok(Location {
            book: book.to_string(),
            chapter: chapter - 1,
        });
    }

    let prev_book = if index > 0 {
        books[index - 1]
    } else {
        books[books.len() - 1]
    };
    let last_chapter = store
        .chapters(language, prev_book)?
        .last()
        .copied()
        .unwrap_or(1);
    Ok(Location {
        book: prev_book.to_string(),
        chapter: last_chapter,
    })
}
