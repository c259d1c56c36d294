//! The `document` subcommand: upload, wait for the translation, download.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use deepl_api::types::{DocumentState, DocumentUpload, Formality, GlossaryId};
use deepl_api::Client;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

const MIN_POLL_SECS: u64 = 1;
const MAX_POLL_SECS: u64 = 30;

#[derive(Args)]
pub struct DocumentArgs {
    /// File to translate (.docx, .pptx, .pdf, .txt, .html, ...)
    pub file: PathBuf,

    /// Target language code
    #[arg(long, short = 't')]
    pub target_lang: String,

    /// Source language code. Detected when omitted.
    #[arg(long, short = 's')]
    pub source_lang: Option<String>,

    /// Formality: default, more, less, prefer_more, prefer_less
    #[arg(long)]
    pub formality: Option<Formality>,

    /// Glossary ID to apply
    #[arg(long)]
    pub glossary: Option<String>,

    /// Where to write the result. Defaults to `<name>.<lang>.<ext>` next to the input.
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

pub async fn run(args: &DocumentArgs, client: &Client) -> Result<()> {
    let content = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("input path has no file name")?;

    let mut upload = DocumentUpload::new(&file_name, content, &args.target_lang);
    if let Some(source_lang) = &args.source_lang {
        upload = upload.with_source_lang(source_lang);
    }
    if let Some(formality) = args.formality {
        upload = upload.with_formality(formality);
    }
    if let Some(id) = &args.glossary {
        upload = upload.with_glossary_id(GlossaryId::from(id.as_str()));
    }

    let handle = client.upload_document(upload).await?;
    tracing::info!("Uploaded {} as document {}", file_name, handle.document_id);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message("queued");

    let status = loop {
        let status = client.get_document_status(&handle).await?;
        if status.is_finished() {
            break status;
        }
        let state = status
            .status
            .map(|s| s.to_string())
            .unwrap_or_default();
        match status.seconds_remaining {
            Some(secs) => pb.set_message(format!("{} (~{}s remaining)", state, secs)),
            None => pb.set_message(state),
        }
        sleep(poll_interval(status.seconds_remaining)).await;
    };

    if status.status == Some(DocumentState::Error) {
        pb.finish_and_clear();
        bail!(
            "document translation failed: {}",
            status.error_message.as_deref().unwrap_or("no reason given")
        );
    }
    pb.finish_with_message(match status.billed_characters {
        Some(chars) => format!("done, {} characters billed", chars),
        None => "done".to_string(),
    });

    let bytes = client.download_document(&handle).await?;
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_destination(&args.file, &args.target_lang));
    tokio::fs::write(&dest, &bytes)
        .await
        .with_context(|| format!("failed to write {}", dest.display()))?;
    println!("{}", dest.display());
    Ok(())
}

/// Wait suggested by the server, clamped to a sane polling range.
fn poll_interval(seconds_remaining: Option<u64>) -> Duration {
    let secs = seconds_remaining
        .unwrap_or(MIN_POLL_SECS)
        .clamp(MIN_POLL_SECS, MAX_POLL_SECS);
    Duration::from_secs(secs)
}

fn default_destination(input: &Path, target_lang: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let lang = target_lang.to_lowercase();
    let name = match input.extension() {
        Some(ext) => format!("{}.{}.{}", stem, lang, ext.to_string_lossy()),
        None => format!("{}.{}", stem, lang),
    };
    input.with_file_name(name)
}
