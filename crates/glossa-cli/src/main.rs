//! Glossa CLI: inspect and annotate content against the backend.

mod display;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use glossa_client::ApiClient;
use glossa_core::{NewAnnotation, SpanId, char_slice, segment};

#[derive(Parser)]
#[command(name = "glossa", version, about = "Annotate and review text content")]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "GLOSSA_API", default_value = "http://localhost:4000")]
    api: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a content unit and render it with its annotations.
    Show { content_id: String },
    /// List the labels available for a content unit.
    Labels { content_id: String },
    /// Create an annotation over a character range.
    Annotate {
        content_id: String,
        /// Label id to assign.
        #[arg(long)]
        label: String,
        /// Start character offset (inclusive).
        #[arg(long)]
        start: usize,
        /// End character offset (exclusive).
        #[arg(long)]
        end: usize,
    },
    /// Delete an annotation by id.
    Delete { span_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("glossa v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let client = ApiClient::new(cli.api);

    match cli.command {
        Command::Show { content_id } => show(&client, &content_id).await,
        Command::Labels { content_id } => labels(&client, &content_id).await,
        Command::Annotate {
            content_id,
            label,
            start,
            end,
        } => annotate(&client, &content_id, &label, start, end).await,
        Command::Delete { span_id } => delete(&client, &span_id).await,
    }
}

async fn show(client: &ApiClient, content_id: &str) -> anyhow::Result<()> {
    let payload = client
        .fetch_content(content_id)
        .await
        .context("fetching content")?;
    let labels = client
        .list_labels(content_id)
        .await
        .context("listing labels")?;

    let segments = segment(&payload.content, &payload.spans);
    println!("{}", display::render_segments(&segments, &labels));
    println!();
    display::print_span_listing(&payload.spans, &labels);
    Ok(())
}

async fn labels(client: &ApiClient, content_id: &str) -> anyhow::Result<()> {
    let labels = client
        .list_labels(content_id)
        .await
        .context("listing labels")?;
    display::print_labels(&labels);
    Ok(())
}

async fn annotate(
    client: &ApiClient,
    content_id: &str,
    label: &str,
    start: usize,
    end: usize,
) -> anyhow::Result<()> {
    let payload = client
        .fetch_content(content_id)
        .await
        .context("fetching content")?;

    let total = payload.content.chars().count();
    if start >= end || end > total {
        bail!("invalid range {start}..{end} for content of {total} characters");
    }

    let request = NewAnnotation {
        label_id: label.to_string(),
        text: char_slice(&payload.content, start, end).to_string(),
        start,
        end,
    };
    let span = client
        .create_annotation(content_id, &request)
        .await
        .context("creating annotation")?;

    println!(
        "created {} [{}..{}] {:?}",
        span.id, span.start, span.end, span.text
    );
    Ok(())
}

async fn delete(client: &ApiClient, span_id: &str) -> anyhow::Result<()> {
    let id = SpanId(span_id.to_string());
    client
        .delete_annotation(&id)
        .await
        .context("deleting annotation")?;
    println!("deleted {id}");
    Ok(())
}
