pub mod segment;
pub mod selection;
pub mod session;
pub mod span;

pub use segment::{Segment, segment};
pub use selection::{RawSelection, SelectionProvider, SelectionSpan, map_selection};
pub use session::{AnnotationSession, DraftId, SpanDraft};
pub use span::{ContentPayload, Label, NewAnnotation, Span, SpanId, char_slice};
