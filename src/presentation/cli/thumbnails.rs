use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::print_json;
use crate::infrastructure::client::ThumbgenClient;

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Video title to build a thumbnail for
    #[arg(long)]
    pub title: String,
}

pub async fn generate(client: &ThumbgenClient, command: GenerateCommand) -> Result<()> {
    let response = client.generate(&command.title).await?;
    print_json(&response)
}

pub async fn stats(client: &ThumbgenClient) -> Result<()> {
    let stats = client.stats().await?;
    print_json(&stats)
}

#[derive(Debug, Args)]
pub struct FetchCommand {
    /// Filename returned by a previous generate call
    pub filename: String,

    /// Write the image here instead of using the filename in the current
    /// directory
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub async fn fetch(client: &ThumbgenClient, command: FetchCommand) -> Result<()> {
    let bytes = client.fetch_thumbnail(&command.filename).await?;

    let output = command
        .output
        .unwrap_or_else(|| PathBuf::from(&command.filename));
    tokio::fs::write(&output, &bytes)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!("Wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
