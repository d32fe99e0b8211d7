//! Materials CLI: browse, edit, export and upload materials of a materials
//! service, and review evidence uploads.
//!
//! Configure with MATERIALS_SERVER_URL (or SERVER_URL); see `ClientConfig`
//! for the other variables.

use anyhow::Context;
use clap::{Parser, Subcommand};
use materials_api_client::EvidenceSubmission;
use materials_cli::{init_tracing, render_container, OutputFormat};
use materials_core::constants::containers;
use materials_core::models::{MaterialId, MaterialKind};
use materials_core::{ClientConfig, ErrorMetadata};
use materials_services::{
    ApprovalOutcome, EditOutcome, EvidenceOutcome, ListOutcome, MaterialsClient, SelectedFile,
    StatusOutcome, UploadOutcome,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "materials", about = "Materials service CLI")]
struct Cli {
    /// Base URL of the materials service
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List materials with their text previews
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List uploads and their review status
    Approvals {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the server status summary
    Status {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Open a material, optionally edit it, and export it locally
    Edit {
        /// Material ID
        id: String,
        /// Material type: image or text. Looked up in the list when omitted
        #[arg(long = "type")]
        kind: Option<MaterialKind>,
        /// Text to stamp onto an image
        #[arg(long)]
        overlay: Option<String>,
        /// Replacement content for a text material
        #[arg(long)]
        text: Option<String>,
        /// Directory to write the export to
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Upload an image file as a new material
    UploadImage {
        /// Path to the image; nothing is uploaded when omitted
        path: Option<PathBuf>,
    },
    /// Upload text as a new material
    UploadText {
        /// Text content; nothing is uploaded when omitted or empty
        text: Option<String>,
    },
    /// Submit evidence (URL, comment and screenshot) for a material
    SubmitEvidence {
        #[arg(long)]
        material_id: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "")]
        comment: String,
        /// Screenshot image file
        #[arg(long)]
        screenshot: PathBuf,
    },
    /// Download a reward QR code
    Qr {
        /// QR file name as listed on the upload record
        file: String,
        /// Directory to write the QR code to
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn print_container(client: &MaterialsClient, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(container) = client.page().container(id) {
        println!("{}", render_container(container, format)?);
    }
    Ok(())
}

fn print_result_errors(client: &MaterialsClient) -> anyhow::Result<()> {
    print_container(client, containers::RESULT, OutputFormat::Text)
}

/// Find the declared kind of `id` in the material list.
async fn lookup_kind(client: &MaterialsClient, id: &MaterialId) -> anyhow::Result<MaterialKind> {
    let materials = client
        .api()
        .list_materials()
        .await
        .context("Failed to fetch the material list")?;
    let kind = materials
        .iter()
        .find(|m| &m.id == id)
        .map(|m| m.kind())
        .unwrap_or(MaterialKind::Image);
    tracing::debug!(material_id = %id, kind = %kind, "Resolved material kind");
    Ok(kind)
}

async fn edit(
    client: &mut MaterialsClient,
    id: MaterialId,
    kind: Option<MaterialKind>,
    overlay: Option<String>,
    text: Option<String>,
) -> anyhow::Result<PathBuf> {
    let kind = match kind {
        Some(kind) => kind,
        None => lookup_kind(client, &id).await?,
    };

    if let EditOutcome::Failed(message) = client.open(&id, kind).await {
        anyhow::bail!(message);
    }

    if let Some(overlay) = overlay {
        client
            .stamp_overlay(&overlay)
            .map_err(|e| anyhow::anyhow!(e.client_message()))?;
    }
    if let Some(text) = text {
        client
            .set_text(text)
            .map_err(|e| anyhow::anyhow!(e.client_message()))?;
    }

    let saved = client.download().context("Failed to save the export")?;
    client.back();
    Ok(saved)
}

async fn save_qr(client: &MaterialsClient, file: &str, out: &Path) -> anyhow::Result<PathBuf> {
    let data = client
        .api()
        .fetch_qr(file)
        .await
        .with_context(|| format!("Failed to fetch QR code {}", file))?;
    tokio::fs::create_dir_all(out)
        .await
        .with_context(|| format!("Failed to create {}", out.display()))?;
    let name = Path::new(file)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "qr.png".into());
    let path = out.join(name);
    tokio::fs::write(&path, &data)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.server_url {
        config.set_server_url(url);
        config.validate()?;
    }
    if let Commands::Edit { out: Some(dir), .. } = &cli.command {
        config.download_dir = dir.clone();
    }
    let download_dir = config.download_dir.clone();

    let mut client = MaterialsClient::from_config(config)
        .context("Failed to create API client. Check MATERIALS_SERVER_URL")?;

    let ok = match cli.command {
        Commands::List { format } => {
            let outcome = client.refresh_materials().await;
            print_container(&client, containers::MATERIAL_LIST, format)?;
            print_result_errors(&client)?;
            !matches!(outcome, ListOutcome::Failed)
        }
        Commands::Approvals { format } => {
            let outcome = client.refresh_approvals().await;
            print_container(&client, containers::APPROVAL_LIST, format)?;
            !matches!(outcome, ApprovalOutcome::Failed)
        }
        Commands::Status { format } => {
            let outcome = client.refresh_status().await;
            print_container(&client, containers::STATUS, format)?;
            !matches!(outcome, StatusOutcome::Failed)
        }
        Commands::Edit {
            id,
            kind,
            overlay,
            text,
            ..
        } => {
            let saved = edit(&mut client, MaterialId::new(id), kind, overlay, text).await?;
            println!("{}", saved.display());
            true
        }
        Commands::UploadImage { path } => {
            let file = path
                .as_deref()
                .map(SelectedFile::read)
                .transpose()
                .context("Failed to read the image file")?;
            match client.upload_image(file).await {
                UploadOutcome::Skipped => {
                    println!("No file selected, nothing uploaded");
                    true
                }
                UploadOutcome::Uploaded => {
                    print_container(&client, containers::MATERIAL_LIST, OutputFormat::Text)?;
                    true
                }
                UploadOutcome::Failed(_) => {
                    print_result_errors(&client)?;
                    false
                }
            }
        }
        Commands::UploadText { text } => {
            let text = text.unwrap_or_default();
            match client.upload_text(&text).await {
                UploadOutcome::Skipped => {
                    println!("No text entered, nothing uploaded");
                    true
                }
                UploadOutcome::Uploaded => {
                    print_container(&client, containers::MATERIAL_LIST, OutputFormat::Text)?;
                    true
                }
                UploadOutcome::Failed(_) => {
                    print_result_errors(&client)?;
                    false
                }
            }
        }
        Commands::SubmitEvidence {
            material_id,
            url,
            comment,
            screenshot,
        } => {
            let shot = SelectedFile::read(&screenshot)
                .with_context(|| format!("Failed to read {}", screenshot.display()))?;
            let submission = EvidenceSubmission {
                material_id: MaterialId::new(material_id),
                url,
                comment,
                screenshot_name: shot.file_name,
                screenshot_content_type: shot.content_type,
                screenshot: shot.data,
            };
            match client.submit_evidence(submission).await {
                EvidenceOutcome::Submitted(receipt) => {
                    println!("{} (evidence id {})", receipt.message, receipt.evidence_id);
                    print_container(&client, containers::APPROVAL_LIST, OutputFormat::Text)?;
                    true
                }
                EvidenceOutcome::Failed(_) => {
                    print_result_errors(&client)?;
                    false
                }
            }
        }
        Commands::Qr { file, out } => {
            let out = out.unwrap_or(download_dir);
            let saved = save_qr(&client, &file, &out).await?;
            println!("{}", saved.display());
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
