//! The `languages` subcommand.

use anyhow::Result;
use clap::Args;
use deepl_api::{Client, LanguageType};

use crate::output::{print_languages, OutputFormat};

#[derive(Args)]
pub struct LanguagesArgs {
    /// Which side of a translation: source or target. Anything else lists sources.
    #[arg(long = "type", default_value = "source")]
    pub language_type: String,
}

pub async fn run(args: &LanguagesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let language_type: LanguageType = args.language_type.parse().unwrap_or_default();
    let languages = client.get_languages(language_type).await?;
    tracing::info!("{} {} languages", languages.len(), language_type);
    print_languages(&languages, format)
}
