//! The annotation store
//!
//! `Store` is the sole owner of persisted state: the imported verse
//! corpora, the five annotation collections, and verse groups, all in
//! one SQLite database. It is constructed explicitly (no ambient
//! global) and closed when dropped.
//!
//! Mutations issued by one caller execute serially on the underlying
//! connection, so sequential operations against the same verse are
//! observed in issue order. There is no record-level versioning:
//! concurrent writers to the same record are last-write-wins.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{
    AnnotationStyle, DrawNote, Highlight, Language, Note, TextAnnotation, Verse, VerseGroup,
    VerseLink,
};
use crate::reference::VerseRef;
use crate::storage::{init_schema, needs_init};

type Result<T> = std::result::Result<T, StoreError>;

/// Local persistent store for verse text and annotations
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the store at the configured database path
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.sqlite_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        Self::open_at(path)
    }

    /// Open or create the store at an explicit path
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if needs_init(&conn) {
            init_schema(&conn)?;
        }
        Ok(Self { conn })
    }

    // ==================== Verse corpus ====================

    /// Number of verses imported for a corpus
    pub fn corpus_count(&self, language: Language) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM verses WHERE language = ?",
            [language.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Bulk-insert a corpus batch in one transaction
    pub fn insert_verses(&mut self, language: Language, verses: &[Verse]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO verses (language, book_name, book, chapter, verse, text)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for verse in verses {
                stmt.execute(params![
                    language.as_str(),
                    verse.book_name,
                    verse.book,
                    verse.chapter,
                    verse.verse,
                    verse.text,
                ])?;
            }
        }
        tx.commit()?;
        Ok(verses.len())
    }

    /// All verses of one chapter, sorted by verse number
    pub fn verses_for_chapter(
        &self,
        language: Language,
        book_name: &str,
        chapter: u32,
    ) -> Result<Vec<Verse>> {
        let mut stmt = self.conn.prepare(
            "SELECT book_name, book, chapter, verse, text FROM verses
             WHERE language = ?1 AND book_name = ?2 AND chapter = ?3
             ORDER BY verse",
        )?;
        let rows = stmt.query_map(params![language.as_str(), book_name, chapter], |row| {
            Ok(Verse {
                book_name: row.get(0)?,
                book: row.get(1)?,
                chapter: row.get(2)?,
                verse: row.get(3)?,
                text: row.get(4)?,
            })
        })?;
        collect(rows)
    }

    /// Look up one verse by reference
    pub fn get_verse(&self, language: Language, reference: &VerseRef) -> Result<Option<Verse>> {
        let verse = self
            .conn
            .query_row(
                "SELECT book_name, book, chapter, verse, text FROM verses
                 WHERE language = ?1 AND book_name = ?2 AND chapter = ?3 AND verse = ?4",
                params![
                    language.as_str(),
                    reference.book,
                    reference.chapter,
                    reference.verse
                ],
                |row| {
                    Ok(Verse {
                        book_name: row.get(0)?,
                        book: row.get(1)?,
                        chapter: row.get(2)?,
                        verse: row.get(3)?,
                        text: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(verse)
    }

    /// Distinct chapter numbers of a book, ascending
    pub fn chapters(&self, language: Language, book_name: &str) -> Result<Vec<u32>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT chapter FROM verses
             WHERE language = ?1 AND book_name = ?2
             ORDER BY chapter",
        )?;
        let rows = stmt.query_map(params![language.as_str(), book_name], |row| row.get(0))?;
        collect(rows)
    }

    /// Distinct book names present in a corpus, in corpus order
    pub fn books_present(&self, language: Language) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT book_name FROM verses WHERE language = ?
             GROUP BY book_name ORDER BY MIN(book)",
        )?;
        let rows = stmt.query_map([language.as_str()], |row| row.get(0))?;
        collect(rows)
    }

    // ==================== Notes ====================

    pub fn add_note(&mut self, note: &Note) -> Result<()> {
        self.conn.execute(
            "INSERT INTO notes (id, verse_ref, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                note.id.to_string(),
                note.verse_ref,
                note.content,
                note.created_at,
                note.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Delete a note; returns false if no such record existed
    pub fn delete_note(&mut self, id: Uuid) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", [id.to_string()])?;
        Ok(n > 0)
    }

    /// Notes for one verse, in insertion order
    pub fn notes_for_verse(&self, verse_ref: &str) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, verse_ref, content, created_at, updated_at FROM notes
             WHERE verse_ref = ? ORDER BY rowid",
        )?;
        let rows = stmt.query_map([verse_ref], note_row)?;
        let raw = collect(rows)?;
        raw.into_iter().map(note_from_raw).collect()
    }

    /// Every note in the store, in insertion order (the "all notes" view)
    pub fn all_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, verse_ref, content, created_at, updated_at FROM notes ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], note_row)?;
        let raw = collect(rows)?;
        raw.into_iter().map(note_from_raw).collect()
    }

    // ==================== Highlights ====================

    /// Insert a batch of highlights atomically.
    ///
    /// The highlight action writes one record per language in a single
    /// transaction so the pair shares fate.
    pub fn add_highlights(&mut self, highlights: &[Highlight]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO highlights (id, verse_ref, color, language, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for h in highlights {
                stmt.execute(params![
                    h.id.to_string(),
                    h.verse_ref,
                    h.color,
                    h.language.as_str(),
                    h.created_at,
                    h.updated_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn delete_highlight(&mut self, id: Uuid) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM highlights WHERE id = ?", [id.to_string()])?;
        Ok(n > 0)
    }

    /// Highlights for one verse, in insertion order. Rendering uses
    /// the first record per language; later ones are orphans.
    pub fn highlights_for_verse(&self, verse_ref: &str) -> Result<Vec<Highlight>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, verse_ref, color, language, created_at, updated_at FROM highlights
             WHERE verse_ref = ? ORDER BY rowid",
        )?;
        let rows = stmt.query_map([verse_ref], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })?;
        let raw = collect(rows)?;
        raw.into_iter()
            .map(|(id, verse_ref, color, language, created_at, updated_at)| {
                Ok(Highlight {
                    id: parse_uuid("highlights", &id)?,
                    verse_ref,
                    color,
                    language: parse_language("highlights", &language)?,
                    created_at,
                    updated_at,
                })
            })
            .collect()
    }

    // ==================== Verse links ====================

    pub fn add_verse_link(&mut self, link: &VerseLink) -> Result<()> {
        self.conn.execute(
            "INSERT INTO verse_links (id, source_ref, target_ref, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                link.id.to_string(),
                link.source_ref,
                link.target_ref,
                link.created_at,
                link.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn delete_verse_link(&mut self, id: Uuid) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM verse_links WHERE id = ?", [id.to_string()])?;
        Ok(n > 0)
    }

    /// Links whose source is the given verse, in insertion order
    pub fn links_from(&self, source_ref: &str) -> Result<Vec<VerseLink>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source_ref, target_ref, created_at, updated_at FROM verse_links
             WHERE source_ref = ? ORDER BY rowid",
        )?;
        let rows = stmt.query_map([source_ref], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;
        let raw = collect(rows)?;
        raw.into_iter()
            .map(|(id, source_ref, target_ref, created_at, updated_at)| {
                Ok(VerseLink {
                    id: parse_uuid("verse_links", &id)?,
                    source_ref,
                    target_ref,
                    created_at,
                    updated_at,
                })
            })
            .collect()
    }

    // ==================== Draw notes ====================

    pub fn add_draw_note(&mut self, draw_note: &DrawNote) -> Result<()> {
        self.conn.execute(
            "INSERT INTO draw_notes (id, verse_ref, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draw_note.id.to_string(),
                draw_note.verse_ref,
                draw_note.data,
                draw_note.created_at,
                draw_note.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn delete_draw_note(&mut self, id: Uuid) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM draw_notes WHERE id = ?", [id.to_string()])?;
        Ok(n > 0)
    }

    pub fn draw_notes_for_verse(&self, verse_ref: &str) -> Result<Vec<DrawNote>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, verse_ref, data, created_at, updated_at FROM draw_notes
             WHERE verse_ref = ? ORDER BY rowid",
        )?;
        let rows = stmt.query_map([verse_ref], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;
        let raw = collect(rows)?;
        raw.into_iter()
            .map(|(id, verse_ref, data, created_at, updated_at)| {
                Ok(DrawNote {
                    id: parse_uuid("draw_notes", &id)?,
                    verse_ref,
                    data,
                    created_at,
                    updated_at,
                })
            })
            .collect()
    }

    // ==================== Text annotations ====================

    pub fn add_text_annotation(&mut self, annotation: &TextAnnotation) -> Result<()> {
        let style = serde_json::to_string(&annotation.style).map_err(|e| {
            StoreError::CorruptRecord {
                table: "text_annotations",
                details: format!("failed to encode style: {e}"),
            }
        })?;
        self.conn.execute(
            "INSERT INTO text_annotations
             (id, verse_ref, start_offset, end_offset, style, language, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                annotation.id.to_string(),
                annotation.verse_ref,
                annotation.start as i64,
                annotation.end as i64,
                style,
                annotation.language.as_str(),
                annotation.created_at,
                annotation.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn delete_text_annotation(&mut self, id: Uuid) -> Result<bool> {
        let n = self.conn.execute(
            "DELETE FROM text_annotations WHERE id = ?",
            [id.to_string()],
        )?;
        Ok(n > 0)
    }

    /// Text annotations for one verse, in insertion order. The
    /// segmentation engine's stable sort relies on this ordering to
    /// break equal-start ties.
    pub fn annotations_for_verse(&self, verse_ref: &str) -> Result<Vec<TextAnnotation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, verse_ref, start_offset, end_offset, style, language,
                    created_at, updated_at
             FROM text_annotations WHERE verse_ref = ? ORDER BY rowid",
        )?;
        let rows = stmt.query_map([verse_ref], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, i64>(7)?,
            ))
        })?;
        let raw = collect(rows)?;
        raw.into_iter()
            .map(
                |(id, verse_ref, start, end, style, language, created_at, updated_at)| {
                    let style: AnnotationStyle =
                        serde_json::from_str(&style).map_err(|e| StoreError::CorruptRecord {
                            table: "text_annotations",
                            details: format!("bad style JSON: {e}"),
                        })?;
                    Ok(TextAnnotation {
                        id: parse_uuid("text_annotations", &id)?,
                        verse_ref,
                        start: start.max(0) as usize,
                        end: end.max(0) as usize,
                        style,
                        language: parse_language("text_annotations", &language)?,
                        created_at,
                        updated_at,
                    })
                },
            )
            .collect()
    }

    // ==================== Verse groups ====================

    /// Insert or overwrite a group record
    pub fn put_group(&mut self, group: &VerseGroup) -> Result<()> {
        let refs =
            serde_json::to_string(&group.verse_refs).map_err(|e| StoreError::CorruptRecord {
                table: "verse_groups",
                details: format!("failed to encode verse_refs: {e}"),
            })?;
        self.conn.execute(
            "INSERT OR REPLACE INTO verse_groups
             (id, book_name, chapter, verse_refs, subheading, notes, border_color,
              created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                group.id.to_string(),
                group.book_name,
                group.chapter,
                refs,
                group.subheading,
                group.notes,
                group.border_color,
                group.created_at,
                group.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_group(&self, id: Uuid) -> Result<Option<VerseGroup>> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, book_name, chapter, verse_refs, subheading, notes, border_color,
                        created_at, updated_at
                 FROM verse_groups WHERE id = ?",
                [id.to_string()],
                group_row,
            )
            .optional()?;
        raw.map(group_from_raw).transpose()
    }

    pub fn delete_group(&mut self, id: Uuid) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM verse_groups WHERE id = ?", [id.to_string()])?;
        Ok(n > 0)
    }

    /// Groups of one chapter, sorted by their first member's number
    pub fn groups_for_chapter(&self, book_name: &str, chapter: u32) -> Result<Vec<VerseGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, book_name, chapter, verse_refs, subheading, notes, border_color,
                    created_at, updated_at
             FROM verse_groups WHERE book_name = ?1 AND chapter = ?2",
        )?;
        let rows = stmt.query_map(params![book_name, chapter], group_row)?;
        let raw = collect(rows)?;
        let mut groups: Vec<VerseGroup> = raw
            .into_iter()
            .map(group_from_raw)
            .collect::<Result<_>>()?;
        groups.sort_by_key(|g| g.member_numbers().first().copied().unwrap_or(u32::MAX));
        Ok(groups)
    }

    // ==================== Stats ====================

    /// Row counts per collection, for the status view
    pub fn counts(&self) -> Result<StoreCounts> {
        let count = |table: &str| -> Result<i64> {
            let n = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
            Ok(n)
        };
        Ok(StoreCounts {
            english_verses: self.corpus_count(Language::English)?,
            telugu_verses: self.corpus_count(Language::Telugu)?,
            notes: count("notes")?,
            highlights: count("highlights")?,
            verse_links: count("verse_links")?,
            draw_notes: count("draw_notes")?,
            text_annotations: count("text_annotations")?,
            verse_groups: count("verse_groups")?,
        })
    }
}

/// Row counts for the status view
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreCounts {
    pub english_verses: i64,
    pub telugu_verses: i64,
    pub notes: i64,
    pub highlights: i64,
    pub verse_links: i64,
    pub draw_notes: i64,
    pub text_annotations: i64,
    pub verse_groups: i64,
}

// ==================== Row mapping helpers ====================

type NoteRaw = (String, String, String, i64, i64);

fn note_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteRaw> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn note_from_raw((id, verse_ref, content, created_at, updated_at): NoteRaw) -> Result<Note> {
    Ok(Note {
        id: parse_uuid("notes", &id)?,
        verse_ref,
        content,
        created_at,
        updated_at,
    })
}

type GroupRaw = (
    String,
    String,
    u32,
    String,
    String,
    String,
    String,
    i64,
    i64,
);

fn group_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GroupRaw> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn group_from_raw(raw: GroupRaw) -> Result<VerseGroup> {
    let (id, book_name, chapter, refs, subheading, notes, border_color, created_at, updated_at) =
        raw;
    let verse_refs: Vec<String> =
        serde_json::from_str(&refs).map_err(|e| StoreError::CorruptRecord {
            table: "verse_groups",
            details: format!("bad verse_refs JSON: {e}"),
        })?;
    Ok(VerseGroup {
        id: parse_uuid("verse_groups", &id)?,
        book_name,
        chapter,
        verse_refs,
        subheading,
        notes,
        border_color,
        created_at,
        updated_at,
    })
}

fn parse_uuid(table: &'static str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| StoreError::CorruptRecord {
        table,
        details: format!("bad uuid '{value}': {e}"),
    })
}

fn parse_language(table: &'static str, value: &str) -> Result<Language> {
    Language::parse(value).ok_or_else(|| StoreError::CorruptRecord {
        table,
        details: format!("unknown language '{value}'"),
    })
}

fn collect<T>(rows: impl Iterator<Item = rusqlite::Result<T>>) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::now_millis;

    fn verse(book: &str, chapter: u32, n: u32, text: &str) -> Verse {
        Verse {
            book_name: book.to_string(),
            book: 1,
            chapter,
            verse: n,
            text: text.to_string(),
        }
    }

    fn sample_ref() -> VerseRef {
        VerseRef::new("Genesis", 1, 1)
    }

    #[test]
    fn test_open_at_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("berean.db");
        {
            let _store = Store::open_at(&path).unwrap();
        }
        assert!(path.exists());

        // Reopening finds the schema already initialized
        let store = Store::open_at(&path).unwrap();
        assert_eq!(store.corpus_count(Language::English).unwrap(), 0);
    }

    #[test]
    fn test_insert_and_query_verses() {
        let mut store = Store::open_in_memory().unwrap();
        let verses = vec![
            verse("Genesis", 1, 1, "In the beginning"),
            verse("Genesis", 1, 2, "And the earth was without form"),
            verse("Genesis", 2, 1, "Thus the heavens"),
        ];
        store.insert_verses(Language::English, &verses).unwrap();

        assert_eq!(store.corpus_count(Language::English).unwrap(), 3);
        assert_eq!(store.corpus_count(Language::Telugu).unwrap(), 0);

        let chapter = store
            .verses_for_chapter(Language::English, "Genesis", 1)
            .unwrap();
        assert_eq!(chapter.len(), 2);
        assert_eq!(chapter[0].verse, 1);

        assert_eq!(
            store.chapters(Language::English, "Genesis").unwrap(),
            vec![1, 2]
        );
        assert_eq!(
            store.books_present(Language::English).unwrap(),
            vec!["Genesis"]
        );

        let one = store
            .get_verse(Language::English, &sample_ref())
            .unwrap()
            .unwrap();
        assert_eq!(one.text, "In the beginning");
    }

    #[test]
    fn test_note_roundtrip_and_insertion_order() {
        let mut store = Store::open_in_memory().unwrap();
        let r = sample_ref();
        let first = Note::new(&r, "first");
        let second = Note::new(&r, "second");
        store.add_note(&first).unwrap();
        store.add_note(&second).unwrap();

        let notes = store.notes_for_verse("Genesis:1:1").unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "first");
        assert_eq!(notes[1].content, "second");
        assert_eq!(notes[0], first);

        assert!(store.delete_note(first.id).unwrap());
        assert!(!store.delete_note(first.id).unwrap());
        assert_eq!(store.all_notes().unwrap().len(), 1);
    }

    #[test]
    fn test_highlight_batch_roundtrip() {
        let mut store = Store::open_in_memory().unwrap();
        let r = sample_ref();
        let now = now_millis();
        let pair = [
            Highlight::with_timestamps(&r, "#FFFF00", Language::English, now, now),
            Highlight::with_timestamps(&r, "#FFFF00", Language::Telugu, now, now),
        ];
        store.add_highlights(&pair).unwrap();

        let stored = store.highlights_for_verse("Genesis:1:1").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].language, Language::English);
        assert_eq!(stored[1].language, Language::Telugu);
        assert_eq!(stored[0].created_at, stored[1].created_at);

        assert!(store.delete_highlight(pair[0].id).unwrap());
        assert_eq!(store.highlights_for_verse("Genesis:1:1").unwrap().len(), 1);
    }

    #[test]
    fn test_link_roundtrip() {
        let mut store = Store::open_in_memory().unwrap();
        let link = VerseLink::new(&sample_ref(), "John:3:16");
        store.add_verse_link(&link).unwrap();

        let links = store.links_from("Genesis:1:1").unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0], link);
        assert!(store.links_from("John:3:16").unwrap().is_empty());

        assert!(store.delete_verse_link(link.id).unwrap());
    }

    #[test]
    fn test_draw_note_roundtrip() {
        let mut store = Store::open_in_memory().unwrap();
        let draw = DrawNote::new(&sample_ref(), "aGVsbG8=");
        store.add_draw_note(&draw).unwrap();

        let stored = store.draw_notes_for_verse("Genesis:1:1").unwrap();
        assert_eq!(stored, vec![draw.clone()]);
        assert!(store.delete_draw_note(draw.id).unwrap());
    }

    #[test]
    fn test_text_annotation_roundtrip() {
        let mut store = Store::open_in_memory().unwrap();
        let style = AnnotationStyle {
            color: Some("#0000FF".to_string()),
            bold: Some(true),
            ..Default::default()
        };
        let annotation = TextAnnotation::new(&sample_ref(), 3, 6, style, Language::English);
        store.add_text_annotation(&annotation).unwrap();

        let stored = store.annotations_for_verse("Genesis:1:1").unwrap();
        assert_eq!(stored, vec![annotation.clone()]);
        // Unset fields survive the JSON column as unset
        assert!(stored[0].style.italic.is_none());

        assert!(store.delete_text_annotation(annotation.id).unwrap());
    }

    #[test]
    fn test_group_put_get_and_sort() {
        let mut store = Store::open_in_memory().unwrap();
        let mut later = VerseGroup {
            id: Uuid::new_v4(),
            book_name: "Genesis".to_string(),
            chapter: 1,
            verse_refs: vec!["7".to_string(), "8".to_string()],
            subheading: "later".to_string(),
            notes: String::new(),
            border_color: "#00FF00".to_string(),
            created_at: 1,
            updated_at: 1,
        };
        let earlier = VerseGroup {
            id: Uuid::new_v4(),
            verse_refs: vec!["2".to_string(), "3".to_string()],
            subheading: "earlier".to_string(),
            ..later.clone()
        };
        store.put_group(&later).unwrap();
        store.put_group(&earlier).unwrap();

        let groups = store.groups_for_chapter("Genesis", 1).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].subheading, "earlier");
        assert_eq!(groups[1].subheading, "later");

        // put_group overwrites by id
        later.subheading = "renamed".to_string();
        store.put_group(&later).unwrap();
        let fetched = store.get_group(later.id).unwrap().unwrap();
        assert_eq!(fetched.subheading, "renamed");

        assert!(store.delete_group(earlier.id).unwrap());
        assert_eq!(store.groups_for_chapter("Genesis", 1).unwrap().len(), 1);
    }

    #[test]
    fn test_counts() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_verses(Language::English, &[verse("Genesis", 1, 1, "In the beginning")])
            .unwrap();
        store.add_note(&Note::new(&sample_ref(), "note")).unwrap();

        let counts = store.counts().unwrap();
        assert_eq!(counts.english_verses, 1);
        assert_eq!(counts.telugu_verses, 0);
        assert_eq!(counts.notes, 1);
        assert_eq!(counts.verse_groups, 0);
    }
}
