//! Berean CLI
//!
//! Command-line interface for Berean - local-first Bible study notes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use berean_core::{Config, Store};

mod commands;
mod output;

use commands::read::Movement;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "berean")]
#[command(about = "Berean - scripture reading with local notes, highlights, and groups")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a verse corpus from a JSON file
    Import {
        /// Corpus language (english or telugu)
        language: String,
        /// Corpus file; falls back to the configured path
        file: Option<PathBuf>,
    },
    /// Read a chapter with its groups and annotations
    Read {
        /// Book name, e.g. "Genesis" or "1 Samuel"
        book: String,
        /// Chapter number
        chapter: u32,
        /// Rendering: english, telugu, or both
        #[arg(short, long, default_value = "english")]
        language: String,
        /// Move to the following chapter before reading
        #[arg(long, conflicts_with = "previous")]
        next: bool,
        /// Move to the preceding chapter before reading
        #[arg(long, conflicts_with = "next")]
        previous: bool,
    },
    /// List the canonical books
    Books {
        /// Corpus to validate against
        #[arg(short, long, default_value = "english")]
        language: String,
    },
    /// List the chapters of a book
    Chapters {
        /// Book name
        book: String,
        #[arg(short, long, default_value = "english")]
        language: String,
    },
    /// Manage notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage whole-verse highlights
    Highlight {
        #[command(subcommand)]
        command: HighlightCommands,
    },
    /// Manage cross-reference links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Manage drawings
    Draw {
        #[command(subcommand)]
        command: DrawCommands,
    },
    /// Manage styled text annotations
    Annotate {
        #[command(subcommand)]
        command: AnnotateCommands,
    },
    /// Manage verse groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Show status (data dir, record counts)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Add a note to a verse
    #[command(alias = "add")]
    Create {
        /// Verse reference, e.g. Genesis:1:1
        verse_ref: String,
        /// Note content
        content: String,
    },
    /// List notes on a verse, or all notes
    #[command(alias = "ls")]
    List {
        /// Verse reference; omit to list every note
        verse_ref: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID (full UUID or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum HighlightCommands {
    /// Highlight a verse in both languages
    #[command(alias = "add")]
    Create {
        /// Verse reference, e.g. Genesis:1:1
        verse_ref: String,
        /// Hex color, e.g. "#FFFF00"
        color: String,
    },
    /// List highlight records on a verse
    #[command(alias = "ls")]
    List {
        verse_ref: String,
    },
    /// Remove one highlight record
    #[command(alias = "rm")]
    Delete {
        /// Highlight ID
        id: String,
    },
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Link a verse to another reference
    #[command(alias = "add")]
    Create {
        /// Source verse reference
        source: String,
        /// Target reference, e.g. John:3:16
        target: String,
    },
    /// List links from a verse
    #[command(alias = "ls")]
    List {
        source: String,
    },
    /// Remove a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID
        id: String,
    },
}

#[derive(Subcommand)]
enum DrawCommands {
    /// Attach a drawing file to a verse
    #[command(alias = "add")]
    Create {
        /// Verse reference
        verse_ref: String,
        /// Image file to store
        file: PathBuf,
    },
    /// List drawings on a verse
    #[command(alias = "ls")]
    List {
        verse_ref: String,
    },
    /// Remove a drawing
    #[command(alias = "rm")]
    Delete {
        /// Drawing ID
        id: String,
    },
}

#[derive(Subcommand)]
enum AnnotateCommands {
    /// Annotate a text range of a verse
    #[command(alias = "add")]
    Create {
        /// Verse reference
        verse_ref: String,
        /// Language the offsets index into (english or telugu)
        language: String,
        /// Range start (UTF-16 code units)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Text color, e.g. "#0000FF"
        #[arg(long)]
        color: Option<String>,
        /// Underline type: solid, dotted, dashed, wavy
        #[arg(long)]
        underline: Option<String>,
        #[arg(long)]
        bold: bool,
        #[arg(long)]
        italic: bool,
        /// Font family name
        #[arg(long)]
        font: Option<String>,
    },
    /// List text annotations on a verse
    #[command(alias = "ls")]
    List {
        verse_ref: String,
    },
    /// Remove a text annotation
    #[command(alias = "rm")]
    Delete {
        /// Annotation ID
        id: String,
    },
}

#[derive(Subcommand)]
enum GroupCommands {
    /// Group consecutive verses under a shared subheading
    Create {
        /// Book name
        book: String,
        /// Chapter number
        chapter: u32,
        /// Verse numbers (must be consecutive)
        #[arg(required = true)]
        verses: Vec<u32>,
        #[arg(long)]
        subheading: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Border color, defaults to "#FF0000"
        #[arg(long)]
        color: Option<String>,
        /// Overwrite an existing group by ID instead of creating one
        #[arg(long)]
        edit: Option<String>,
    },
    /// List groups in a chapter
    #[command(alias = "ls")]
    List {
        book: String,
        chapter: u32,
    },
    /// Replace a group's notes
    EditNotes {
        /// Group ID
        id: String,
        /// New notes text
        notes: String,
    },
    /// Remove one verse from a group
    RemoveVerse {
        /// Group ID
        id: String,
        /// Verse number to remove
        verse: u32,
    },
    /// Delete a group
    #[command(alias = "rm")]
    Delete {
        /// Group ID
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, english_corpus, telugu_corpus)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;
    let mut store = Store::open(&config)?;

    match cli.command {
        Commands::Import { language, file } => {
            commands::import::run(&mut store, &config, language, file, &output)
        }
        Commands::Read {
            book,
            chapter,
            language,
            next,
            previous,
        } => {
            let movement = if next {
                Movement::Next
            } else if previous {
                Movement::Previous
            } else {
                Movement::Here
            };
            commands::read::run(&store, book, chapter, language, movement, &output)
        }
        Commands::Books { language } => commands::read::books(&store, language, &output),
        Commands::Chapters { book, language } => {
            commands::read::chapters(&store, book, language, &output)
        }
        Commands::Note { command } => handle_note_command(command, &mut store, &output),
        Commands::Highlight { command } => handle_highlight_command(command, &mut store, &output),
        Commands::Link { command } => handle_link_command(command, &mut store, &output),
        Commands::Draw { command } => handle_draw_command(command, &mut store, &output),
        Commands::Annotate { command } => handle_annotate_command(command, &mut store, &output),
        Commands::Group { command } => handle_group_command(command, &mut store, &output),
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_note_command(command: NoteCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        NoteCommands::Create { verse_ref, content } => {
            commands::note::add(store, verse_ref, content, output)
        }
        NoteCommands::List { verse_ref } => commands::note::list(store, verse_ref, output),
        NoteCommands::Delete { id } => commands::note::delete(store, id, output),
    }
}

fn handle_highlight_command(
    command: HighlightCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        HighlightCommands::Create { verse_ref, color } => {
            commands::highlight::add(store, verse_ref, color, output)
        }
        HighlightCommands::List { verse_ref } => {
            commands::highlight::list(store, verse_ref, output)
        }
        HighlightCommands::Delete { id } => commands::highlight::delete(store, id, output),
    }
}

fn handle_link_command(command: LinkCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        LinkCommands::Create { source, target } => {
            commands::link::add(store, source, target, output)
        }
        LinkCommands::List { source } => commands::link::list(store, source, output),
        LinkCommands::Delete { id } => commands::link::delete(store, id, output),
    }
}

fn handle_draw_command(command: DrawCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        DrawCommands::Create { verse_ref, file } => {
            commands::draw::add(store, verse_ref, file, output)
        }
        DrawCommands::List { verse_ref } => commands::draw::list(store, verse_ref, output),
        DrawCommands::Delete { id } => commands::draw::delete(store, id, output),
    }
}

fn handle_annotate_command(
    command: AnnotateCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        AnnotateCommands::Create {
            verse_ref,
            language,
            start,
            end,
            color,
            underline,
            bold,
            italic,
            font,
        } => commands::annotate::add(
            store,
            verse_ref,
            language,
            start,
            end,
            commands::annotate::StyleArgs {
                color,
                underline,
                bold,
                italic,
                font,
            },
            output,
        ),
        AnnotateCommands::List { verse_ref } => commands::annotate::list(store, verse_ref, output),
        AnnotateCommands::Delete { id } => commands::annotate::delete(store, id, output),
    }
}

fn handle_group_command(command: GroupCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        GroupCommands::Create {
            book,
            chapter,
            verses,
            subheading,
            notes,
            color,
            edit,
        } => commands::group::create(
            store, book, chapter, verses, subheading, notes, color, edit, output,
        ),
        GroupCommands::List { book, chapter } => {
            commands::group::list(store, book, chapter, output)
        }
        GroupCommands::EditNotes { id, notes } => {
            commands::group::edit_notes(store, id, notes, output)
        }
        GroupCommands::RemoveVerse { id, verse } => {
            commands::group::remove_verse(store, id, verse, output)
        }
        GroupCommands::Delete { id } => commands::group::delete(store, id, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
