//! Client-local annotation session.
//!
//! Owns the state one annotating surface works against: the immutable
//! content, the confirmed span list, the fetched labels, and any creates
//! still in flight. Lifecycle per span: Idle → Selecting (host-side) →
//! PendingCreate → Committed. Nothing is rendered optimistically; a span
//! appears only after the backend confirms it with a real id, and is
//! removed only after the backend confirms the delete.
//!
//! Every mutation is idempotent and keyed by id, so create and delete
//! round-trips completing out of order are safe.

use crate::selection::{SelectionProvider, map_selection};
use crate::span::{ContentPayload, Label, NewAnnotation, Span, SpanId};

/// Local correlation id for a create request in flight.
///
/// Assigned from a per-session monotonic counter; the backend never sees
/// it. Pairs a dispatched create with its eventual confirmation so
/// replies arriving out of order land on the right draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(pub u64);

/// A selection mapped to offsets and awaiting backend confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanDraft {
    pub draft_id: DraftId,
    pub label_id: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl SpanDraft {
    /// The create-request body for this draft.
    pub fn to_request(&self) -> NewAnnotation {
        NewAnnotation {
            label_id: self.label_id.clone(),
            text: self.text.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

/// Client-local state for one annotated content unit.
pub struct AnnotationSession {
    content: String,
    spans: Vec<Span>,
    labels: Vec<Label>,
    pending: Vec<SpanDraft>,
    next_draft: u64,
}

impl AnnotationSession {
    /// Start a session from a fetch response plus the label set.
    pub fn new(payload: ContentPayload, labels: Vec<Label>) -> Self {
        Self {
            content: payload.content,
            spans: payload.spans,
            labels,
            pending: Vec::new(),
            next_draft: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Confirmed spans, in insertion order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Creates dispatched but not yet confirmed or abandoned.
    pub fn pending(&self) -> &[SpanDraft] {
        &self.pending
    }

    /// Look up a label for rendering.
    pub fn label(&self, label_id: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == label_id)
    }

    /// Display runs over the confirmed spans only; pending drafts are not
    /// rendered until the backend confirms them.
    pub fn segments(&self) -> Vec<crate::segment::Segment> {
        crate::segment::segment(&self.content, &self.spans)
    }

    /// Map the provider's current selection into a pending draft.
    ///
    /// Reads the live selection, resolves it against the content, and on
    /// success clears the provider so the next drag starts fresh. Returns
    /// `None` (and leaves the selection alone) when there is no usable
    /// selection — the ignore-user-error policy.
    pub fn begin_create(
        &mut self,
        provider: &dyn SelectionProvider,
        label_id: &str,
    ) -> Option<SpanDraft> {
        let raw = provider.current_selection()?;
        let mapped = map_selection(&self.content, &raw)?;

        let draft = SpanDraft {
            draft_id: DraftId(self.next_draft),
            label_id: label_id.to_string(),
            text: mapped.text,
            start: mapped.start,
            end: mapped.end,
        };
        self.next_draft += 1;
        self.pending.push(draft.clone());
        provider.clear();
        Some(draft)
    }

    /// Backend confirmed a create: retire the draft and append the span.
    ///
    /// Idempotent on span id — a confirmation carrying an id already in
    /// the list retires the draft but appends nothing.
    pub fn commit(&mut self, draft_id: DraftId, span: Span) {
        self.pending.retain(|d| d.draft_id != draft_id);
        if self.spans.iter().any(|s| s.id == span.id) {
            return;
        }
        self.spans.push(span);
    }

    /// Backend rejected a create: retire the draft, confirmed spans
    /// untouched. Nothing was rendered optimistically, so there is no
    /// rollback.
    pub fn abandon(&mut self, draft_id: DraftId) {
        self.pending.retain(|d| d.draft_id != draft_id);
    }

    /// Backend confirmed a delete: drop the span. A no-op for ids not in
    /// the list.
    pub fn remove(&mut self, span_id: &SpanId) {
        self.spans.retain(|s| &s.id != span_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::RawSelection;
    use std::cell::RefCell;

    const CONTENT: &str = "The patient was diagnosed on 2024-01-05.";

    /// Scripted provider: yields a fixed selection until cleared.
    struct FakeSelection {
        raw: RefCell<Option<RawSelection>>,
    }

    impl FakeSelection {
        fn holding(text: &str, chars_before: usize) -> Self {
            Self {
                raw: RefCell::new(Some(RawSelection {
                    text: text.to_string(),
                    chars_before,
                })),
            }
        }

        fn empty() -> Self {
            Self {
                raw: RefCell::new(None),
            }
        }
    }

    impl SelectionProvider for FakeSelection {
        fn current_selection(&self) -> Option<RawSelection> {
            self.raw.borrow().clone()
        }

        fn clear(&self) {
            *self.raw.borrow_mut() = None;
        }
    }

    fn session() -> AnnotationSession {
        AnnotationSession::new(
            ContentPayload {
                content: CONTENT.to_string(),
                spans: Vec::new(),
            },
            vec![Label {
                id: "DATE".into(),
                name: "Date".into(),
                color: "#ffd54f".into(),
            }],
        )
    }

    fn confirmed(id: &str, draft: &SpanDraft) -> Span {
        Span {
            id: SpanId(id.to_string()),
            label_id: draft.label_id.clone(),
            text: draft.text.clone(),
            start: draft.start,
            end: draft.end,
            created_at: "2026-08-30T10:00:00Z".into(),
        }
    }

    #[test]
    fn begin_create_maps_selection_and_clears_it() {
        let mut s = session();
        let provider = FakeSelection::holding("2024-01-05", 29);

        let draft = s.begin_create(&provider, "DATE").unwrap();
        assert_eq!(draft.start, 29);
        assert_eq!(draft.end, 39);
        assert_eq!(draft.text, "2024-01-05");
        assert_eq!(s.pending().len(), 1);
        // Selection cleared so the next drag starts fresh.
        assert!(provider.current_selection().is_none());
    }

    #[test]
    fn begin_create_without_selection_is_a_no_op() {
        let mut s = session();
        let provider = FakeSelection::empty();
        assert!(s.begin_create(&provider, "DATE").is_none());
        assert!(s.pending().is_empty());
    }

    #[test]
    fn invalid_selection_leaves_provider_untouched() {
        let mut s = session();
        let provider = FakeSelection::holding("   ", 3);
        assert!(s.begin_create(&provider, "DATE").is_none());
        // Whitespace-only selection is ignored, not consumed.
        assert!(provider.current_selection().is_some());
    }

    #[test]
    fn commit_retires_draft_and_appends_span() {
        let mut s = session();
        let provider = FakeSelection::holding("patient", 4);
        let draft = s.begin_create(&provider, "DATE").unwrap();

        s.commit(draft.draft_id, confirmed("a1", &draft));
        assert!(s.pending().is_empty());
        assert_eq!(s.spans().len(), 1);
        assert_eq!(s.spans()[0].id, SpanId("a1".into()));
    }

    #[test]
    fn nothing_rendered_until_commit() {
        let mut s = session();
        let provider = FakeSelection::holding("patient", 4);
        let draft = s.begin_create(&provider, "DATE").unwrap();

        // Pending draft does not appear in the rendered segments.
        assert_eq!(s.segments().len(), 1);

        s.commit(draft.draft_id, confirmed("a1", &draft));
        assert_eq!(s.segments().len(), 3);
    }

    #[test]
    fn duplicate_commit_appends_once() {
        let mut s = session();
        let provider = FakeSelection::holding("patient", 4);
        let draft = s.begin_create(&provider, "DATE").unwrap();

        s.commit(draft.draft_id, confirmed("a1", &draft));
        s.commit(draft.draft_id, confirmed("a1", &draft));
        assert_eq!(s.spans().len(), 1);
    }

    #[test]
    fn abandon_drops_draft_only() {
        let mut s = session();
        let provider = FakeSelection::holding("patient", 4);
        let draft = s.begin_create(&provider, "DATE").unwrap();

        s.abandon(draft.draft_id);
        assert!(s.pending().is_empty());
        assert!(s.spans().is_empty());
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut s = session();
        let provider = FakeSelection::holding("patient", 4);
        let draft = s.begin_create(&provider, "DATE").unwrap();
        s.commit(draft.draft_id, confirmed("a1", &draft));

        s.remove(&SpanId("does-not-exist".into()));
        assert_eq!(s.spans().len(), 1);

        s.remove(&SpanId("a1".into()));
        assert!(s.spans().is_empty());

        // Deleting again stays a no-op.
        s.remove(&SpanId("a1".into()));
        assert!(s.spans().is_empty());
    }

    #[test]
    fn out_of_order_confirmations_land_on_the_right_drafts() {
        let mut s = session();

        let p1 = FakeSelection::holding("patient", 4);
        let d1 = s.begin_create(&p1, "DATE").unwrap();
        let p2 = FakeSelection::holding("2024-01-05", 29);
        let d2 = s.begin_create(&p2, "DATE").unwrap();
        assert_ne!(d1.draft_id, d2.draft_id);

        // Second request resolves first.
        s.commit(d2.draft_id, confirmed("b2", &d2));
        s.commit(d1.draft_id, confirmed("b1", &d1));

        assert!(s.pending().is_empty());
        assert_eq!(s.spans().len(), 2);
        assert_eq!(s.segments().iter().map(|x| x.text()).collect::<String>(), CONTENT);
    }

    #[test]
    fn label_lookup() {
        let s = session();
        assert_eq!(s.label("DATE").map(|l| l.name.as_str()), Some("Date"));
        assert!(s.label("MISSING").is_none());
    }
}
