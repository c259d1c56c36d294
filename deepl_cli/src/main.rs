mod commands;
mod output;

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use deepl_api::Client;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "deepl")]
#[command(about = "Translate text and documents with the DeepL API")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// DeepL authentication key. Keys ending in ":fx" use the Free API.
    #[arg(long, env = "DEEPL_AUTH_KEY", hide_env_values = true, global = true)]
    auth_key: Option<String>,

    /// Override the API base URL (including /v2)
    #[arg(long, env = "DEEPL_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "60", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show character and document usage for the billing period
    Usage,
    /// List supported source or target languages
    Languages(commands::languages::LanguagesArgs),
    /// List language pairs supported by glossaries
    GlossaryPairs,
    /// Translate text
    Translate(commands::translate::TranslateArgs),
    /// Manage glossaries
    Glossaries(commands::glossaries::GlossariesArgs),
    /// Translate a document file
    Document(commands::document::DocumentArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deepl_cli=info".parse()?)
                .add_directive("deepl_api=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_name(&cli.output);

    let Some(auth_key) = cli.auth_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        bail!("no authentication key: pass --auth-key or set DEEPL_AUTH_KEY");
    };

    let mut builder = Client::builder(auth_key.trim()).timeout(Duration::from_secs(cli.timeout));
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;
    tracing::debug!("Using DeepL API at {}", client.base_url());

    match &cli.command {
        Commands::Usage => commands::usage::run(&client, &format).await?,
        Commands::Languages(args) => commands::languages::run(args, &client, &format).await?,
        Commands::GlossaryPairs => commands::glossaries::run_pairs(&client, &format).await?,
        Commands::Translate(args) => commands::translate::run(args, &client, &format).await?,
        Commands::Glossaries(args) => commands::glossaries::run(args, &client, &format).await?,
        Commands::Document(args) => commands::document::run(args, &client).await?,
    }

    Ok(())
}
