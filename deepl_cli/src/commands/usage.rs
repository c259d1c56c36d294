//! The `usage` subcommand.

use anyhow::Result;
use deepl_api::Client;

use crate::output::{print_usage, OutputFormat};

pub async fn run(client: &Client, format: &OutputFormat) -> Result<()> {
    let usage = client.get_usage().await?;
    if usage.limit_reached() {
        tracing::warn!("Character limit reached; translations will be rejected until the next period");
    }
    print_usage(&usage, format)
}
