//! Shared helpers for the `materials` binary: tracing setup and terminal
//! rendering of page containers.

use clap::ValueEnum;
use materials_services::{Container, Node};

/// How a container is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Text,
    /// The container's inner HTML
    Html,
    /// Render nodes as JSON
    Json,
}

/// Render `container` in the requested format.
pub fn render_container(container: &Container, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(container)),
        OutputFormat::Html => Ok(container.inner_html()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(container.nodes())?),
    }
}

/// One line per node; status summaries span several lines.
pub fn render_text(container: &Container) -> String {
    let mut lines = Vec::new();
    let mut header_done = false;
    for node in container.nodes() {
        match node {
            Node::MaterialCard(card) => {
                if !header_done {
                    lines.push(format!(
                        "{:<8} {:<6} {:<30} {:<14} {}",
                        "ID", "Type", "Name", "Category", "Preview"
                    ));
                    lines.push("-".repeat(100));
                    header_done = true;
                }
                lines.push(format!(
                    "{:<8} {:<6} {:<30} {:<14} {}",
                    truncate_string(card.id.as_str(), 8),
                    card.kind.as_str(),
                    truncate_string(&card.name, 30),
                    truncate_string(&card.label, 14),
                    truncate_string(&single_line(&card.preview), 40)
                ));
            }
            Node::UploadCard(card) => {
                if !header_done {
                    lines.push(format!(
                        "{:<24} {:<8} {:<10} {:<40} {}",
                        "ID", "Material", "Status", "URL", "Comment"
                    ));
                    lines.push("-".repeat(110));
                    header_done = true;
                }
                lines.push(format!(
                    "{:<24} {:<8} {:<10} {:<40} {}",
                    truncate_string(&card.id, 24),
                    truncate_string(&card.material_id, 8),
                    truncate_string(&card.status, 10),
                    truncate_string(&card.url, 40),
                    truncate_string(&single_line(&card.comment), 30)
                ));
            }
            Node::Editor(view) => match (view.dimensions, &view.text) {
                (Some((width, height)), _) => lines.push(format!(
                    "Editing {} ({}, {}x{})",
                    view.material_id, view.kind, width, height
                )),
                (None, Some(text)) => lines.push(format!(
                    "Editing {} ({}, {} bytes)",
                    view.material_id,
                    view.kind,
                    text.len()
                )),
                (None, None) => lines.push(format!("Editing {}", view.material_id)),
            },
            Node::Status(status) => {
                lines.push(format!("Server:    {}", status.server));
                lines.push(format!("Materials: {}", status.materials_count));
                lines.push(format!("Uploads:   {}", status.uploads_count));
                lines.push(format!("Pending:   {}", status.pending_count));
                lines.push(format!("Approved:  {}", status.approved_count));
                if !status.timestamp.is_empty() {
                    lines.push(format!("Timestamp: {}", status.timestamp));
                }
            }
            Node::Placeholder { text } => lines.push(text.clone()),
            Node::Error { message } => lines.push(format!("error: {}", message)),
        }
    }
    lines.join("\n")
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for the CLI. `RUST_LOG` wins unless `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
