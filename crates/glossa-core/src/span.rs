//! Shared annotation types for the Glossa overlay core.
//!
//! Offsets throughout are half-open **character** offsets into the full
//! content string, not byte offsets: the content comes from a web surface
//! whose selection API counts characters, and spans stored by the backend
//! use the same coordinate space.

use serde::{Deserialize, Serialize};

/// Backend-assigned span identifier.
///
/// Never generated client-side; pending drafts use a local [`DraftId`]
/// (see the session module) until the backend confirms.
///
/// [`DraftId`]: crate::session::DraftId
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanId(pub String);

impl From<&str> for SpanId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SpanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A confirmed annotation over a labeled character range.
///
/// Immutable once created. `text` redundantly stores the covered
/// substring for display and debugging; at creation time it equals the
/// char-slice `content[start..end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub id: SpanId,
    pub label_id: String,
    pub text: String,
    /// Inclusive start, character offset into the content.
    pub start: usize,
    /// Exclusive end, character offset into the content.
    pub end: usize,
    /// ISO 8601 timestamp string, assigned by the backend.
    pub created_at: String,
}

/// A named, colored category assignable to spans.
///
/// Labels are fetched from the backend and never locally mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    /// Highlight tint as `#rrggbb`.
    pub color: String,
}

/// Request body for creating an annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnotation {
    pub label_id: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Fetch response for a content unit: the text plus its existing spans.
///
/// The content string is immutable for the lifetime of a session and only
/// ever replaced in bulk when navigating to another unit, so span offsets
/// stay valid for the duration of one render cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPayload {
    pub content: String,
    pub spans: Vec<Span>,
}

/// Slice a string by character offsets, clamping to the content length.
///
/// Returns `""` when `start >= end` after clamping. Never panics on
/// multibyte content or out-of-range offsets.
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let mut byte_start = s.len();
    let mut byte_end = s.len();
    for (count, (byte_idx, _)) in s.char_indices().enumerate() {
        if count == start {
            byte_start = byte_idx;
        }
        if count == end {
            byte_end = byte_idx;
            break;
        }
    }
    if byte_start >= byte_end {
        return "";
    }
    &s[byte_start..byte_end]
}
