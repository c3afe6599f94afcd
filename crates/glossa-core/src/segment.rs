//! Span segmentation: turning content plus annotations into display runs.
//!
//! Converts `(content, spans)` into an ordered sequence of alternating
//! plain and highlighted runs for the overlay renderer. For
//! non-overlapping spans the runs cover the content exactly once, left to
//! right, with no gaps and no duplication.

use crate::span::{Span, char_slice};

/// A contiguous run of content, classified for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Unannotated text between highlights.
    Plain { text: String },
    /// Text covered by a span, carrying the span for tint lookup.
    Highlight { span: Span, text: String },
}

impl Segment {
    /// The raw text of this segment regardless of kind.
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } => text,
            Segment::Highlight { text, .. } => text,
        }
    }
}

/// Segment `content` into plain and highlighted runs.
///
/// Pure function of its inputs. Spans may arrive in arbitrary insertion
/// order; they are stable-sorted by `start` before scanning, so two spans
/// sharing a start keep their insertion order.
///
/// # Algorithm
///
/// Scan left to right with a cursor starting at 0. For each span in
/// sorted order: emit a plain run for any gap before the span, emit a
/// highlighted run for the span itself, move the cursor to the span's
/// end. A trailing plain run covers whatever remains.
///
/// # Overlap
///
/// Overlapping spans are emitted as-is: a span starting below the cursor
/// re-emits the shared region inside its own highlight, and the cursor
/// jumps to that span's end (possibly backwards for a nested span). The
/// coverage guarantee only holds for non-overlapping span sets.
///
/// Offsets beyond the content length are clamped; the function never
/// panics on collaborator-supplied data.
pub fn segment(content: &str, spans: &[Span]) -> Vec<Segment> {
    let total_chars = content.chars().count();

    if spans.is_empty() {
        return vec![Segment::Plain {
            text: content.to_string(),
        }];
    }

    let mut ordered: Vec<&Span> = spans.iter().collect();
    ordered.sort_by_key(|s| s.start);

    let mut segments = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut cursor = 0usize;

    for span in ordered {
        let start = span.start.min(total_chars);
        let end = span.end.min(total_chars);
        if start > cursor {
            segments.push(Segment::Plain {
                text: char_slice(content, cursor, start).to_string(),
            });
        }
        segments.push(Segment::Highlight {
            span: span.clone(),
            text: char_slice(content, start, end).to_string(),
        });
        cursor = end;
    }

    if cursor < total_chars {
        segments.push(Segment::Plain {
            text: char_slice(content, cursor, total_chars).to_string(),
        });
    }

    segments
}
