//! Selection-to-offset mapping.
//!
//! Converts a user's drag selection, as reported by the host surface's
//! selection API, into the same `[start, end)` character-offset space the
//! stored spans use. The host API is abstracted behind
//! [`SelectionProvider`] so the mapping is unit-testable without a real
//! rendering surface.

use crate::span::char_slice;

/// A selection as reported by the host surface.
///
/// `chars_before` is the number of rendered characters preceding the
/// selection start within the container (the selection's start boundary
/// collapsed to the container's beginning and measured).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSelection {
    pub text: String,
    pub chars_before: usize,
}

/// Injected capability wrapping the host's live selection object.
pub trait SelectionProvider {
    /// The current selection within the annotated container, if any.
    fn current_selection(&self) -> Option<RawSelection>;

    /// Clear the active selection so the next drag starts fresh.
    fn clear(&self);
}

/// A selection resolved into span coordinates.
///
/// Satisfies `content[start..end] == text` (char offsets) and
/// `end == start + text.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Map a raw selection into span coordinates over `content`.
///
/// The selected text is trimmed; leading whitespace that gets trimmed
/// advances `start` by the same number of characters, so the resolved
/// offsets always point at the trimmed text. Returns `None` when the
/// trimmed selection is empty or when the selection does not line up with
/// the content (user error is ignored silently, never raised).
pub fn map_selection(content: &str, raw: &RawSelection) -> Option<SelectionSpan> {
    let trimmed = raw.text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let leading = raw.text.chars().count() - raw.text.trim_start().chars().count();
    let start = raw.chars_before + leading;
    let end = start + trimmed.chars().count();

    if char_slice(content, start, end) != trimmed {
        tracing::debug!(start, end, "selection does not match content, ignoring");
        return None;
    }

    Some(SelectionSpan {
        text: trimmed.to_string(),
        start,
        end,
    })
}
