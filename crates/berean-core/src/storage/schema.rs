//! SQLite schema for the annotation store
//!
//! Seven record collections: imported verse text (both corpora in one
//! table, discriminated by language), five annotation kinds keyed by
//! verse reference string, and verse groups keyed by book and chapter.

use rusqlite::{Connection, Result};

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- Imported scripture text, one row per verse per language corpus
        CREATE TABLE IF NOT EXISTS verses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            language TEXT NOT NULL,
            book_name TEXT NOT NULL,
            book INTEGER NOT NULL,
            chapter INTEGER NOT NULL,
            verse INTEGER NOT NULL,
            text TEXT NOT NULL
        );

        -- Free-text notes per verse
        CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            verse_ref TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        -- Whole-verse highlights (written in English+Telugu pairs)
        CREATE TABLE IF NOT EXISTS highlights (
            id TEXT PRIMARY KEY,
            verse_ref TEXT NOT NULL,
            color TEXT NOT NULL,
            language TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        -- Directed cross-reference links
        CREATE TABLE IF NOT EXISTS verse_links (
            id TEXT PRIMARY KEY,
            source_ref TEXT NOT NULL,
            target_ref TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        -- Freehand drawings, opaque payload
        CREATE TABLE IF NOT EXISTS draw_notes (
            id TEXT PRIMARY KEY,
            verse_ref TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        -- Styled text ranges; offsets are UTF-16 code units,
        -- style is a JSON object of optional fields
        CREATE TABLE IF NOT EXISTS text_annotations (
            id TEXT PRIMARY KEY,
            verse_ref TEXT NOT NULL,
            start_offset INTEGER NOT NULL,
            end_offset INTEGER NOT NULL,
            style TEXT NOT NULL,
            language TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        -- Verse groups; verse_refs is a JSON array of number strings
        CREATE TABLE IF NOT EXISTS verse_groups (
            id TEXT PRIMARY KEY,
            book_name TEXT NOT NULL,
            chapter INTEGER NOT NULL,
            verse_refs TEXT NOT NULL,
            subheading TEXT NOT NULL,
            notes TEXT NOT NULL,
            border_color TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        -- Indexes for the query surface

        -- One verse per (language, book, chapter, verse); also serves
        -- the chapter view via its (language, book_name, chapter) prefix
        CREATE UNIQUE INDEX IF NOT EXISTS idx_verses_ref
            ON verses(language, book_name, chapter, verse);

        -- Exact-match annotation lookups by verse reference
        CREATE INDEX IF NOT EXISTS idx_notes_verse_ref ON notes(verse_ref);
        CREATE INDEX IF NOT EXISTS idx_highlights_verse_ref ON highlights(verse_ref);
        CREATE INDEX IF NOT EXISTS idx_verse_links_source_ref ON verse_links(source_ref);
        CREATE INDEX IF NOT EXISTS idx_draw_notes_verse_ref ON draw_notes(verse_ref);
        CREATE INDEX IF NOT EXISTS idx_text_annotations_verse_ref ON text_annotations(verse_ref);

        -- Chapter-scoped group lookups
        CREATE INDEX IF NOT EXISTS idx_verse_groups_book_chapter
            ON verse_groups(book_name, chapter);
        "#,
    )?;

    // Set schema version
    conn.execute(
        "INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let mut stmt = conn.prepare("SELECT value FROM schema_info WHERE key = 'version'")?;
    let result: Result<String> = stmt.query_row([], |row| row.get(0));

    match result {
        Ok(version_str) => Ok(version_str.parse().ok()),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Check if schema needs initialization or migration
pub fn needs_init(conn: &Connection) -> bool {
    let table_exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_info'")
        .and_then(|mut stmt| stmt.exists([]))
        .unwrap_or(false);

    if !table_exists {
        return true;
    }

    match get_schema_version(conn) {
        Ok(Some(v)) => v < SCHEMA_VERSION,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for table in [
            "verses",
            "notes",
            "highlights",
            "verse_links",
            "draw_notes",
            "text_annotations",
            "verse_groups",
        ] {
            assert!(tables.contains(&table.to_string()), "missing {table}");
        }
    }

    #[test]
    fn test_schema_version() {
        let conn = Connection::open_in_memory().unwrap();

        assert!(needs_init(&conn));

        init_schema(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
        assert!(!needs_init(&conn));
    }

    #[test]
    fn test_init_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert!(!needs_init(&conn));
    }

    #[test]
    fn test_indexes_exist() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let indexes: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(indexes.contains(&"idx_verses_ref".to_string()));
        assert!(indexes.contains(&"idx_notes_verse_ref".to_string()));
        assert!(indexes.contains(&"idx_verse_groups_book_chapter".to_string()));
    }

    #[test]
    fn test_verse_uniqueness_per_corpus() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let insert = "INSERT INTO verses (language, book_name, book, chapter, verse, text)
                      VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
        conn.execute(
            insert,
            rusqlite::params!["English", "Genesis", 1, 1, 1, "In the beginning"],
        )
        .unwrap();
        // Same reference in the other corpus is fine
        conn.execute(
            insert,
            rusqlite::params!["Telugu", "Genesis", 1, 1, 1, "ఆదియందు"],
        )
        .unwrap();
        // Duplicate within a corpus is rejected
        let dup = conn.execute(
            insert,
            rusqlite::params!["English", "Genesis", 1, 1, 1, "again"],
        );
        assert!(dup.is_err());
    }
}
