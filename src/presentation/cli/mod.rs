pub mod thumbnails;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use thumbnails::{FetchCommand, GenerateCommand};

use crate::infrastructure::generation;

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate YouTube thumbnails from video titles", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "THUMBGEN_URL",
        default_value = "http://localhost:5001"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Generate a thumbnail for a title via a running server
    Generate(GenerateCommand),

    /// Show the trending statistics a running server currently applies
    Stats,

    /// Download a previously generated thumbnail
    Fetch(FetchCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "THUMBGEN_BIND_ADDRESS", default_value = "127.0.0.1:5001")]
    pub bind_address: SocketAddr,

    /// Endpoint of the remote text-to-image API
    #[arg(
        long,
        env = "THUMBGEN_GENERATION_URL",
        default_value = generation::DEFAULT_GENERATION_URL
    )]
    pub generation_url: String,

    #[arg(long, env = "THUMBGEN_GENERATION_API_KEY")]
    pub generation_api_key: Option<String>,

    #[arg(
        long,
        env = "THUMBGEN_GENERATION_MODEL",
        default_value = generation::DEFAULT_MODEL
    )]
    pub generation_model: String,

    /// How the generation API wraps its result: 'output-images' for a
    /// response carrying image URLs, 'inline-image' for base64 payloads
    #[arg(
        long,
        env = "THUMBGEN_RESPONSE_SCHEMA",
        default_value = "output-images"
    )]
    pub response_schema: String,

    /// JSON file written by the trending-thumbnail analysis job
    #[arg(
        long,
        env = "THUMBGEN_STATS_FILE",
        default_value = "thumbnail_stats.json"
    )]
    pub stats_file: PathBuf,

    /// Directory generated thumbnails are written to and served from
    #[arg(long, env = "THUMBGEN_STORAGE_DIR", default_value = "thumbnails")]
    pub storage_dir: PathBuf,

    /// TrueType font for the title overlay. When unset, well-known system
    /// locations are probed, with a built-in bitmap font as last resort
    #[arg(long, env = "THUMBGEN_FONT_PATH")]
    pub font_path: Option<PathBuf>,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
