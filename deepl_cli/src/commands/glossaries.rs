//! The `glossaries` and `glossary-pairs` subcommands.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use deepl_api::types::{CreateGlossary, GlossaryEntries, GlossaryId};
use deepl_api::Client;

use crate::output::{print_entries, print_glossaries, print_language_pairs, OutputFormat};

#[derive(Args)]
pub struct GlossariesArgs {
    #[command(subcommand)]
    pub command: GlossaryCommand,
}

#[derive(Subcommand)]
pub enum GlossaryCommand {
    /// List all glossaries
    List,
    /// Show one glossary's metadata
    Show {
        /// Glossary ID
        id: String,
    },
    /// Print a glossary's entries
    Entries {
        /// Glossary ID
        id: String,
    },
    /// Create a glossary from a TSV file and/or --entry pairs
    Create(CreateArgs),
    /// Delete a glossary
    Delete {
        /// Glossary ID
        id: String,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    /// Glossary name
    #[arg(long)]
    pub name: String,

    /// Source language code (e.g. en)
    #[arg(long)]
    pub source_lang: String,

    /// Target language code (e.g. de)
    #[arg(long)]
    pub target_lang: String,

    /// File of tab-separated `source<TAB>target` lines
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Single entry as `source=target` (repeatable)
    #[arg(long = "entry")]
    pub entries: Vec<String>,
}

pub async fn run(args: &GlossariesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        GlossaryCommand::List => {
            let list = client.list_glossaries().await?;
            tracing::info!("{} glossaries", list.glossaries.len());
            print_glossaries(&list.glossaries, format)?;
        }
        GlossaryCommand::Show { id } => {
            let glossary = client.get_glossary(&GlossaryId::from(id.as_str())).await?;
            print_glossaries(std::slice::from_ref(&glossary), format)?;
        }
        GlossaryCommand::Entries { id } => {
            let entries = client
                .get_glossary_entries(&GlossaryId::from(id.as_str()))
                .await?;
            print_entries(entries.entries(), format)?;
        }
        GlossaryCommand::Create(create) => {
            let entries = collect_entries(create)?;
            let request = CreateGlossary::new(
                &create.name,
                &create.source_lang,
                &create.target_lang,
                &entries,
            );
            let glossary = client.create_glossary(&request).await?;
            tracing::info!("Created glossary {}", glossary.glossary_id);
            print_glossaries(std::slice::from_ref(&glossary), format)?;
        }
        GlossaryCommand::Delete { id } => {
            client.delete_glossary(&GlossaryId::from(id.as_str())).await?;
            tracing::info!("Deleted glossary {}", id);
        }
    }
    Ok(())
}

/// Lists language pairs usable for glossaries.
pub async fn run_pairs(client: &Client, format: &OutputFormat) -> Result<()> {
    let pairs = client.get_glossary_language_pairs().await?;
    print_language_pairs(&pairs.supported_languages, format)
}

fn collect_entries(args: &CreateArgs) -> Result<GlossaryEntries> {
    let mut entries = match &args.file {
        Some(path) => {
            let tsv = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GlossaryEntries::from_tsv(&tsv)
        }
        None => GlossaryEntries::new(),
    };
    for pair in &args.entries {
        let Some((source, target)) = pair.split_once('=') else {
            bail!("invalid entry '{}': expected source=target", pair);
        };
        if source.trim().is_empty() || target.trim().is_empty() {
            bail!("invalid entry '{}': both sides must be non-empty", pair);
        }
        entries = entries.with_entry(source.trim(), target.trim());
    }
    if entries.is_empty() {
        bail!("a glossary needs at least one entry: pass --file or --entry");
    }
    Ok(entries)
}
