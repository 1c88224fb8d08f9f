//! Chapter reading view
//!
//! Prints a chapter as its partition into single verses and groups,
//! rendering each verse's text through the segmentation engine and
//! listing the verse's notes, links, and drawings beneath it.

use std::collections::HashMap;

use anyhow::{bail, Result};
use berean_core::{
    canon, grouping, navigation, segment, ChapterUnit, Highlight, Language, Store, TextAnnotation,
    Verse,
};
use serde_json::json;

use crate::output::{render_segments, truncate, verse_range, Output};

/// Direction flags for `read`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Here,
    Next,
    Previous,
}

/// Which renderings to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    English,
    Telugu,
    Both,
}

impl Translation {
    pub fn parse(input: &str) -> Result<Self> {
        match input {
            _ if input.eq_ignore_ascii_case("both") => Ok(Translation::Both),
            _ => match Language::parse(input) {
                Some(Language::English) => Ok(Translation::English),
                Some(Language::Telugu) => Ok(Translation::Telugu),
                None => bail!("Unknown translation '{input}' (expected english, telugu, or both)"),
            },
        }
    }

    fn languages(self) -> &'static [Language] {
        match self {
            Translation::English => &[Language::English],
            Translation::Telugu => &[Language::Telugu],
            Translation::Both => &Language::ALL,
        }
    }

    /// The corpus the chapter walk is driven by
    fn primary(self) -> Language {
        match self {
            Translation::Telugu => Language::Telugu,
            _ => Language::English,
        }
    }
}

pub fn run(
    store: &Store,
    book: String,
    chapter: u32,
    translation: String,
    movement: Movement,
    output: &Output,
) -> Result<()> {
    let translation = Translation::parse(&translation)?;
    let primary = translation.primary();

    let (book, chapter) = match movement {
        Movement::Here => (book, chapter),
        Movement::Next => {
            let loc = navigation::next_chapter(store, primary, &book, chapter)?;
            (loc.book, loc.chapter)
        }
        Movement::Previous => {
            let loc = navigation::previous_chapter(store, primary, &book, chapter)?;
            (loc.book, loc.chapter)
        }
    };

    let verses = store.verses_for_chapter(primary, &book, chapter)?;
    if verses.is_empty() {
        if output.is_json() {
            println!("{}", json!({ "book": book, "chapter": chapter, "units": [] }));
        } else {
            println!("No verses found for {book} {chapter}");
        }
        return Ok(());
    }

    // Secondary rendering (the corpus that is not driving the walk),
    // joined by reference string.
    let secondary: HashMap<String, Verse> = match translation {
        Translation::Both => store
            .verses_for_chapter(Language::Telugu, &book, chapter)?
            .into_iter()
            .map(|v| (v.reference().to_string(), v))
            .collect(),
        _ => HashMap::new(),
    };

    let groups = store.groups_for_chapter(&book, chapter)?;
    let units = grouping::partition(&verses, &groups);

    if output.is_json() {
        let rendered = units
            .iter()
            .map(|unit| unit_json(store, unit, translation, &secondary))
            .collect::<Result<Vec<_>>>()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "book": book,
                "chapter": chapter,
                "units": rendered,
            }))?
        );
        return Ok(());
    }

    if !output.is_quiet() {
        println!("{book} {chapter}");
        println!();
    }

    for unit in &units {
        match unit {
            ChapterUnit::Group { group, verses } => {
                println!(
                    "── verses {} · {} [{}] ──",
                    verse_range(group),
                    if group.subheading.is_empty() {
                        "(no subheading)"
                    } else {
                        &group.subheading
                    },
                    group.border_color
                );
                for verse in verses {
                    println!("  {}. {}", verse.verse, verse.text);
                    if translation == Translation::Both {
                        if let Some(telugu) = secondary.get(&verse.reference().to_string()) {
                            println!("     {}", telugu.text);
                        }
                    }
                }
                if !group.notes.is_empty() {
                    println!("  notes: {}", group.notes);
                }
                println!();
            }
            ChapterUnit::Single(verse) => print_verse(store, verse, translation, &secondary)?,
        }
    }

    Ok(())
}

/// List the canonical books, validated against the imported corpus
pub fn books(store: &Store, language: String, output: &Output) -> Result<()> {
    let language = crate::commands::parse_language(&language)?;
    let books = canon::books(store, language)?;

    if output.is_json() {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }
    for book in books {
        println!("{book}");
    }
    Ok(())
}

/// List the chapters present for a book
pub fn chapters(store: &Store, book: String, language: String, output: &Output) -> Result<()> {
    let language = crate::commands::parse_language(&language)?;
    let chapters = store.chapters(language, &book)?;

    if output.is_json() {
        println!("{}", serde_json::to_string_pretty(&chapters)?);
        return Ok(());
    }
    if chapters.is_empty() {
        println!("No chapters found for {book}");
        return Ok(());
    }
    for chapter in chapters {
        println!("{chapter}");
    }
    Ok(())
}

/// Print one ungrouped verse with its annotations
fn print_verse(
    store: &Store,
    verse: &Verse,
    translation: Translation,
    secondary: &HashMap<String, Verse>,
) -> Result<()> {
    let verse_ref = verse.reference().to_string();
    let highlights = store.highlights_for_verse(&verse_ref)?;
    let annotations = store.annotations_for_verse(&verse_ref)?;

    let mut first_line = true;
    for &language in translation.languages() {
        let text = text_for(verse, language, translation, secondary);
        let Some(text) = text else { continue };

        let line = render_language(text, language, &highlights, &annotations);
        if first_line {
            println!("{:>3}. {line}", verse.verse);
            first_line = false;
        } else {
            println!("     {line}");
        }
    }

    for note in store.notes_for_verse(&verse_ref)? {
        println!("     note: {}", truncate(&note.content, 70));
    }
    for link in store.links_from(&verse_ref)? {
        println!("     linked to: {}", link.target_ref);
    }
    for _draw in store.draw_notes_for_verse(&verse_ref)? {
        println!("     [drawing]");
    }

    Ok(())
}

/// The text to render for a language, if this translation shows it
fn text_for<'a>(
    verse: &'a Verse,
    language: Language,
    translation: Translation,
    secondary: &'a HashMap<String, Verse>,
) -> Option<&'a str> {
    match (translation, language) {
        (Translation::Both, Language::Telugu) => secondary
            .get(&verse.reference().to_string())
            .map(|v| v.text.as_str()),
        _ => Some(&verse.text),
    }
}

/// Segment one language's text and render it as a plain line
fn render_language(
    text: &str,
    language: Language,
    highlights: &[Highlight],
    annotations: &[TextAnnotation],
) -> String {
    let filtered: Vec<TextAnnotation> = annotations
        .iter()
        .filter(|a| a.language == language)
        .cloned()
        .collect();
    // First matching highlight wins; later records are orphans.
    let highlight = highlights.iter().find(|h| h.language == language);
    let segments = segment::segment(text, &filtered, highlight);
    render_segments(&segments, highlight.map(|h| h.color.as_str()))
}

/// JSON rendering of one partition unit
fn unit_json(
    store: &Store,
    unit: &ChapterUnit<'_>,
    translation: Translation,
    secondary: &HashMap<String, Verse>,
) -> Result<serde_json::Value> {
    match unit {
        ChapterUnit::Group { group, verses } => Ok(json!({
            "kind": "group",
            "id": group.id,
            "subheading": group.subheading,
            "notes": group.notes,
            "border_color": group.border_color,
            "verses": verses.iter().map(|v| json!({
                "verse": v.verse,
                "text": v.text,
            })).collect::<Vec<_>>(),
        })),
        ChapterUnit::Single(verse) => {
            let verse_ref = verse.reference().to_string();
            let highlights = store.highlights_for_verse(&verse_ref)?;
            let annotations = store.annotations_for_verse(&verse_ref)?;

            let mut renderings = Vec::new();
            for &language in translation.languages() {
                let Some(text) = text_for(verse, language, translation, secondary) else {
                    continue;
                };
                let filtered: Vec<TextAnnotation> = annotations
                    .iter()
                    .filter(|a| a.language == language)
                    .cloned()
                    .collect();
                let highlight = highlights.iter().find(|h| h.language == language);
                let segments = segment::segment(text, &filtered, highlight);
                renderings.push(json!({
                    "language": language,
                    "segments": segments.iter().map(segment_json).collect::<Vec<_>>(),
                }));
            }

            Ok(json!({
                "kind": "single",
                "verse": verse.verse,
                "reference": verse_ref,
                "renderings": renderings,
                "notes": store.notes_for_verse(&verse_ref)?,
                "links": store.links_from(&verse_ref)?,
                "drawings": store.draw_notes_for_verse(&verse_ref)?.len(),
            }))
        }
    }
}

fn segment_json(segment: &segment::Segment<'_>) -> serde_json::Value {
    json!({
        "text": segment.text,
        "style": {
            "background": segment.style.background,
            "color": segment.style.color,
            "underline": segment.style.underline.map(|u| u.as_str()),
            "bold": segment.style.bold,
            "italic": segment.style.italic,
            "font_family": segment.style.font_family,
        },
    })
}
