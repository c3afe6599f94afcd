//! Terminal rendering for annotated content.
//!
//! Renders the segmenter's output with ANSI 24-bit background tints taken
//! from label colors, followed by a span listing keyed by label name.

use glossa_core::{Label, Segment, Span};

/// Render segments into a single string with ANSI highlight escapes.
///
/// Highlighted runs get the label's color as a background tint; segments
/// whose label is missing or whose color does not parse fall back to
/// reverse video.
pub fn render_segments(segments: &[Segment], labels: &[Label]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Plain { text } => out.push_str(text),
            Segment::Highlight { span, text } => {
                let color = labels
                    .iter()
                    .find(|l| l.id == span.label_id)
                    .and_then(|l| parse_hex_color(&l.color));
                match color {
                    Some((r, g, b)) => {
                        out.push_str(&format!("\x1b[48;2;{r};{g};{b}m\x1b[30m{text}\x1b[0m"));
                    }
                    None => {
                        out.push_str(&format!("\x1b[7m{text}\x1b[0m"));
                    }
                }
            }
        }
    }
    out
}

/// Print the span listing below the rendered content.
pub fn print_span_listing(spans: &[Span], labels: &[Label]) {
    if spans.is_empty() {
        println!("(no annotations)");
        return;
    }

    println!("Annotations ({}):", spans.len());
    for span in spans {
        let label_name = labels
            .iter()
            .find(|l| l.id == span.label_id)
            .map(|l| l.name.as_str())
            .unwrap_or(span.label_id.as_str());
        println!(
            "  {:<10} {:<12} [{:>4}..{:<4}] {}",
            span.id, label_name, span.start, span.end, span.text
        );
    }
}

/// Print the label set as a table.
pub fn print_labels(labels: &[Label]) {
    if labels.is_empty() {
        println!("(no labels)");
        return;
    }
    println!("Labels ({}):", labels.len());
    for label in labels {
        println!("  {:<12} {:<20} {}", label.id, label.name, label.color);
    }
}

/// Parse a `#rrggbb` color string into RGB components.
fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
