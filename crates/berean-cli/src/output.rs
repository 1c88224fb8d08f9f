//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use berean_core::{DrawNote, Note, Segment, TextAnnotation, VerseGroup, VerseLink};
use chrono::DateTime;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a success message (suppressed in quiet mode)
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{message}"),
            OutputFormat::Json | OutputFormat::Quiet => {}
        }
    }

    /// Print a list of notes
    pub fn print_notes(&self, notes: &[Note]) {
        match self.format {
            OutputFormat::Human => {
                if notes.is_empty() {
                    println!("No notes found.");
                    return;
                }
                for note in notes {
                    println!(
                        "{} | {} | [{}] {}",
                        &note.id.to_string()[..8],
                        note.verse_ref,
                        format_millis(note.created_at),
                        truncate(&note.content, 60)
                    );
                }
                println!("\n{} note(s)", notes.len());
            }
            OutputFormat::Json => print_json(notes),
            OutputFormat::Quiet => {
                for note in notes {
                    println!("{}", note.id);
                }
            }
        }
    }

    /// Print a list of verse links
    pub fn print_links(&self, links: &[VerseLink]) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for link in links {
                    println!(
                        "{} | {} -> {}",
                        &link.id.to_string()[..8],
                        link.source_ref,
                        link.target_ref
                    );
                }
            }
            OutputFormat::Json => print_json(links),
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print a list of drawings (payloads elided in human output)
    pub fn print_draw_notes(&self, draw_notes: &[DrawNote]) {
        match self.format {
            OutputFormat::Human => {
                if draw_notes.is_empty() {
                    println!("No drawings found.");
                    return;
                }
                for d in draw_notes {
                    println!(
                        "{} | {} | [{}] {} bytes",
                        &d.id.to_string()[..8],
                        d.verse_ref,
                        format_millis(d.created_at),
                        d.data.len()
                    );
                }
            }
            OutputFormat::Json => print_json(draw_notes),
            OutputFormat::Quiet => {
                for d in draw_notes {
                    println!("{}", d.id);
                }
            }
        }
    }

    /// Print a list of text annotations
    pub fn print_annotations(&self, annotations: &[TextAnnotation]) {
        match self.format {
            OutputFormat::Human => {
                if annotations.is_empty() {
                    println!("No text annotations found.");
                    return;
                }
                for a in annotations {
                    let mut style_parts = Vec::new();
                    if let Some(ref c) = a.style.color {
                        style_parts.push(c.clone());
                    }
                    if let Some(u) = a.style.underline {
                        style_parts.push(format!("underline {}", u.as_str()));
                    }
                    if a.style.bold == Some(true) {
                        style_parts.push("bold".to_string());
                    }
                    if a.style.italic == Some(true) {
                        style_parts.push("italic".to_string());
                    }
                    if let Some(ref f) = a.style.font_family {
                        style_parts.push(f.clone());
                    }
                    println!(
                        "{} | {} ({}) {}..{} | {}",
                        &a.id.to_string()[..8],
                        a.verse_ref,
                        a.language,
                        a.start,
                        a.end,
                        style_parts.join(", ")
                    );
                }
            }
            OutputFormat::Json => print_json(annotations),
            OutputFormat::Quiet => {
                for a in annotations {
                    println!("{}", a.id);
                }
            }
        }
    }

    /// Print a list of verse groups
    pub fn print_groups(&self, groups: &[VerseGroup]) {
        match self.format {
            OutputFormat::Human => {
                if groups.is_empty() {
                    println!("No groups found.");
                    return;
                }
                for g in groups {
                    println!(
                        "{} | {} {} verses {} | {}",
                        &g.id.to_string()[..8],
                        g.book_name,
                        g.chapter,
                        verse_range(g),
                        if g.subheading.is_empty() {
                            "(no subheading)"
                        } else {
                            &g.subheading
                        }
                    );
                }
            }
            OutputFormat::Json => print_json(groups),
            OutputFormat::Quiet => {
                for g in groups {
                    println!("{}", g.id);
                }
            }
        }
    }
}

/// Render one verse line's segments as plain text.
///
/// Annotated runs are wrapped in brackets so styling is visible in a
/// terminal without colors; a trailing marker names the highlight.
pub fn render_segments(segments: &[Segment<'_>], highlight_color: Option<&str>) -> String {
    let mut line = String::new();
    for segment in segments {
        let annotated = segment.style.background.is_none()
            && (segment.style.color.is_some()
                || segment.style.underline.is_some()
                || segment.style.bold
                || segment.style.italic
                || segment.style.font_family.is_some());
        if annotated {
            line.push('[');
            line.push_str(segment.text);
            line.push(']');
        } else {
            line.push_str(segment.text);
        }
    }
    if let Some(color) = highlight_color {
        line.push_str(&format!("  (highlight {color})"));
    }
    line
}

/// Display form of a group's member range, e.g. "3-5" or "7"
pub fn verse_range(group: &VerseGroup) -> String {
    let numbers = group.member_numbers();
    match (numbers.first(), numbers.last()) {
        (Some(first), Some(last)) if first != last => format!("{first}-{last}"),
        (Some(first), _) => first.to_string(),
        _ => String::new(),
    }
}

/// Format a millisecond timestamp for human output
pub fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

/// Truncate a string, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    let flat = s.replace('\n', " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
