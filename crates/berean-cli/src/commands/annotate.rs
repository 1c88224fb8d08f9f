//! Text annotation command handlers

use anyhow::{bail, Context, Result};
use berean_core::{annotations, AnnotationStyle, Store, UnderlineType};
use uuid::Uuid;

use crate::commands::{parse_language, parse_ref};
use crate::output::Output;

/// Style flags accepted by `annotate add`
pub struct StyleArgs {
    pub color: Option<String>,
    pub underline: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub font: Option<String>,
}

impl StyleArgs {
    fn into_style(self) -> Result<AnnotationStyle> {
        let underline = match self.underline.as_deref() {
            None => None,
            Some("solid") => Some(UnderlineType::Solid),
            Some("dotted") => Some(UnderlineType::Dotted),
            Some("dashed") => Some(UnderlineType::Dashed),
            Some("wavy") => Some(UnderlineType::Wavy),
            Some(other) => bail!(
                "Unknown underline type '{other}' (expected solid, dotted, dashed, or wavy)"
            ),
        };
        Ok(AnnotationStyle {
            color: self.color,
            underline,
            // Flags are tri-state in the model; the CLI only sets them
            // when passed, leaving the rest unset.
            bold: self.bold.then_some(true),
            italic: self.italic.then_some(true),
            font_family: self.font,
        })
    }
}

/// Annotate a text range of a verse in one language
#[allow(clippy::too_many_arguments)]
pub fn add(
    store: &mut Store,
    verse_ref: String,
    language: String,
    start: usize,
    end: usize,
    style: StyleArgs,
    output: &Output,
) -> Result<()> {
    let verse_ref = parse_ref(&verse_ref)?;
    let language = parse_language(&language)?;
    let style = style.into_style()?;

    let annotation =
        annotations::add_text_annotation(store, &verse_ref, language, start, end, style)
            .context("Failed to add text annotation")?;

    output.success(&format!(
        "Annotated {verse_ref} ({language}) {start}..{end} as {}",
        &annotation.id.to_string()[..8]
    ));
    if output.is_quiet() {
        println!("{}", annotation.id);
    }
    Ok(())
}

/// List text annotations on a verse
pub fn list(store: &Store, verse_ref: String, output: &Output) -> Result<()> {
    let verse_ref = parse_ref(&verse_ref)?;
    let annotations = store.annotations_for_verse(&verse_ref.to_string())?;
    output.print_annotations(&annotations);
    Ok(())
}

/// Remove a text annotation
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let uuid = Uuid::parse_str(&id).with_context(|| format!("Invalid annotation ID: {id}"))?;
    if !annotations::remove_text_annotation(store, uuid)? {
        bail!("No text annotation found matching: {id}");
    }
    output.success(&format!("Removed annotation: {}", &id[..8.min(id.len())]));
    Ok(())
}
