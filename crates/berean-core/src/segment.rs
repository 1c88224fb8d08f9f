//! Text segmentation engine
//!
//! Splits a verse's text into an ordered, non-overlapping sequence of
//! styled display segments, reconciling the verse's text-range
//! annotations with an optional whole-verse highlight.
//!
//! Invariants:
//! - Concatenating the emitted slices reproduces the input text
//!   exactly.
//! - Segments are emitted left to right and empty slices are
//!   collapsed.
//!
//! Annotation offsets are UTF-16 code units (the form they were
//! captured in). They are mapped to byte offsets here; an offset past
//! the end of the text, or one landing inside a code point, is clamped
//! to the nearest preceding boundary. An annotation whose clamped
//! range is empty, or that falls entirely behind text already
//! consumed by an earlier annotation, is skipped; a partial overlap is
//! clamped forward. The engine never fails - anything it cannot
//! interpret renders unstyled.

use crate::models::{AnnotationStyle, Highlight, TextAnnotation, UnderlineType};

/// Resolved display styling for one segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentStyle<'a> {
    /// Background color from a whole-verse highlight
    pub background: Option<&'a str>,
    /// Text color from an annotation
    pub color: Option<&'a str>,
    pub underline: Option<UnderlineType>,
    pub bold: bool,
    pub italic: bool,
    pub font_family: Option<&'a str>,
}

impl<'a> SegmentStyle<'a> {
    /// Style for un-annotated text under an optional highlight
    fn base(highlight: Option<&'a Highlight>) -> Self {
        Self {
            background: highlight.map(|h| h.color.as_str()),
            ..Default::default()
        }
    }

    /// Style for an annotated range. The annotation's styling replaces
    /// the highlight background rather than blending with it.
    fn from_annotation(style: &'a AnnotationStyle) -> Self {
        Self {
            background: None,
            color: style.color.as_deref(),
            underline: style.underline,
            bold: style.bold.unwrap_or(false),
            italic: style.italic.unwrap_or(false),
            font_family: style.font_family.as_deref(),
        }
    }

    /// True if this segment renders as plain text
    pub fn is_plain(&self) -> bool {
        *self == SegmentStyle::default()
    }
}

/// One styled run of verse text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub style: SegmentStyle<'a>,
}

/// Convert a UTF-16 code-unit offset to a byte offset into `text`.
///
/// Offsets beyond the text clamp to its end; an offset inside a
/// supplementary-plane character (between its surrogate halves) clamps
/// back to the start of that character.
fn utf16_to_byte_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0usize;
    for (byte_idx, ch) in text.char_indices() {
        if units >= utf16_offset {
            return byte_idx;
        }
        let next = units + ch.len_utf16();
        if next > utf16_offset {
            // Inside a surrogate pair: clamp to the char start.
            return byte_idx;
        }
        units = next;
    }
    text.len()
}

/// Compute the display segments for one verse's text in one language.
///
/// `annotations` must already be filtered to the text's language; the
/// caller picks at most one `highlight` the same way (first match
/// wins). Equal-start annotations keep their given (insertion) order -
/// the sort is stable.
pub fn segment<'a>(
    text: &'a str,
    annotations: &'a [TextAnnotation],
    highlight: Option<&'a Highlight>,
) -> Vec<Segment<'a>> {
    if annotations.is_empty() && highlight.is_none() {
        return vec![Segment {
            text,
            style: SegmentStyle::default(),
        }];
    }

    let mut sorted: Vec<&TextAnnotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| a.start);

    let base = SegmentStyle::base(highlight);
    let mut segments = Vec::with_capacity(2 * sorted.len() + 1);
    let mut cursor = 0usize;

    for annotation in sorted {
        let start = utf16_to_byte_offset(text, annotation.start);
        let end = utf16_to_byte_offset(text, annotation.end);

        // Empty after clamping, or entirely behind the cursor
        // (overlap with a previous annotation): render nothing for it.
        if end <= cursor || end <= start {
            continue;
        }
        let start = start.max(cursor);

        if start > cursor {
            segments.push(Segment {
                text: &text[cursor..start],
                style: base.clone(),
            });
        }
        segments.push(Segment {
            text: &text[start..end],
            style: SegmentStyle::from_annotation(&annotation.style),
        });
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(Segment {
            text: &text[cursor..],
            style: base,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use crate::reference::VerseRef;

    fn ann(start: usize, end: usize) -> TextAnnotation {
        ann_styled(start, end, AnnotationStyle::default())
    }

    fn ann_styled(start: usize, end: usize, style: AnnotationStyle) -> TextAnnotation {
        TextAnnotation::new(
            &VerseRef::new("Genesis", 1, 1),
            start,
            end,
            style,
            Language::English,
        )
    }

    fn highlight(color: &str) -> Highlight {
        Highlight::new(&VerseRef::new("Genesis", 1, 1), color, Language::English)
    }

    fn concat(segments: &[Segment<'_>]) -> String {
        segments.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_no_annotations_no_highlight() {
        let segments = segment("In the beginning", &[], None);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "In the beginning");
        assert!(segments[0].style.is_plain());
    }

    #[test]
    fn test_highlight_only() {
        let h = highlight("#FFFF00");
        let segments = segment("In the beginning", &[], Some(&h));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].style.background, Some("#FFFF00"));
        assert_eq!(concat(&segments), "In the beginning");
    }

    #[test]
    fn test_single_annotation_partitions() {
        let annotations = vec![ann(3, 6)];
        let segments = segment("In the beginning", &annotations, None);
        assert_eq!(
            segments.iter().map(|s| s.text).collect::<Vec<_>>(),
            vec!["In ", "the", " beginning"]
        );
        assert!(segments[0].style.is_plain());
        assert!(segments[2].style.is_plain());
    }

    #[test]
    fn test_annotation_overrides_highlight_background() {
        let h = highlight("#FFFF00");
        let annotations = vec![ann_styled(
            3,
            6,
            AnnotationStyle {
                bold: Some(true),
                ..Default::default()
            },
        )];
        let segments = segment("In the beginning", &annotations, Some(&h));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].style.background, Some("#FFFF00"));
        assert_eq!(segments[1].style.background, None);
        assert!(segments[1].style.bold);
        assert_eq!(segments[2].style.background, Some("#FFFF00"));
    }

    #[test]
    fn test_segment_count_with_highlight() {
        // Non-overlapping, start-sorted annotations with non-empty
        // leading, interior and trailing text: exactly 2*|A|+1
        // segments.
        let h = highlight("#ABCDEF");
        let annotations = vec![ann(3, 6), ann(7, 10)];
        let text = "In the beginning God";
        let segments = segment(text, &annotations, Some(&h));
        assert_eq!(segments.len(), 2 * annotations.len() + 1);
        assert_eq!(concat(&segments), text);
    }

    #[test]
    fn test_leading_annotation_collapses_gap() {
        let h = highlight("#ABCDEF");
        let annotations = vec![ann(0, 2)];
        let segments = segment("In the beginning", &annotations, Some(&h));
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "In");
    }

    #[test]
    fn test_concat_reproduces_text() {
        let h = highlight("#00FF00");
        let text = "And God said, Let there be light: and there was light.";
        let annotations = vec![ann(4, 7), ann(14, 17), ann(27, 32)];
        for hl in [None, Some(&h)] {
            let segments = segment(text, &annotations, hl);
            assert_eq!(concat(&segments), text);
        }
    }

    #[test]
    fn test_equal_start_keeps_insertion_order() {
        let first = ann_styled(
            3,
            6,
            AnnotationStyle {
                bold: Some(true),
                ..Default::default()
            },
        );
        let second = ann_styled(
            3,
            9,
            AnnotationStyle {
                italic: Some(true),
                ..Default::default()
            },
        );
        let annotations = vec![first, second];
        let segments = segment("In the beginning", &annotations, None);
        // First inserted wins the range at offset 3; the second is
        // clamped forward past the consumed text.
        assert!(segments.iter().any(|s| s.text == "the" && s.style.bold));
        assert!(segments
            .iter()
            .any(|s| s.text == " be" && s.style.italic));
        assert_eq!(concat(&segments), "In the beginning");
    }

    #[test]
    fn test_out_of_range_offsets_clamped() {
        let annotations = vec![ann(10, 500)];
        let text = "In the beginning";
        let segments = segment(text, &annotations, None);
        assert_eq!(concat(&segments), text);
        assert_eq!(segments.last().unwrap().text, "ginning");
    }

    #[test]
    fn test_fully_out_of_range_annotation_skipped() {
        let annotations = vec![ann(400, 500)];
        let text = "In the beginning";
        let segments = segment(text, &annotations, None);
        assert_eq!(concat(&segments), text);
        assert!(segments.iter().all(|s| s.style.is_plain()));
    }

    #[test]
    fn test_inverted_range_skipped() {
        let annotations = vec![ann(6, 3)];
        let text = "In the beginning";
        let segments = segment(text, &annotations, None);
        assert_eq!(concat(&segments), text);
    }

    #[test]
    fn test_utf16_offsets_on_multibyte_text() {
        // Telugu characters are one UTF-16 unit but three UTF-8 bytes.
        let text = "ఆదియందు దేవుడు";
        let units: usize = text.chars().take(3).map(|c| c.len_utf16()).sum();
        let annotations = vec![ann(0, units)];
        let segments = segment(text, &annotations, None);
        assert_eq!(concat(&segments), text);
        assert_eq!(segments[0].text.chars().count(), 3);
    }

    #[test]
    fn test_utf16_offset_mapping() {
        assert_eq!(utf16_to_byte_offset("abc", 0), 0);
        assert_eq!(utf16_to_byte_offset("abc", 2), 2);
        assert_eq!(utf16_to_byte_offset("abc", 99), 3);

        // U+1F600 is 2 UTF-16 units (surrogate pair) and 4 UTF-8
        // bytes; an offset between the halves clamps back to the char
        // start.
        let text = "a\u{1F600}b";
        assert_eq!(utf16_to_byte_offset(text, 1), 1);
        assert_eq!(utf16_to_byte_offset(text, 2), 1);
        assert_eq!(utf16_to_byte_offset(text, 3), 5);
    }

    #[test]
    fn test_adjacent_annotations_no_gap_segment() {
        let annotations = vec![ann(0, 2), ann(2, 6)];
        let text = "In the beginning";
        let segments = segment(text, &annotations, None);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "In");
        assert_eq!(segments[1].text, " the");
        assert_eq!(segments[2].text, " beginning");
    }

    #[test]
    fn test_empty_text_with_highlight() {
        let h = highlight("#FFFF00");
        let segments = segment("", &[], Some(&h));
        assert!(segments.is_empty());
    }
}
