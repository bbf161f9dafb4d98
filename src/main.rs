use anyhow::Result;
use clap::Parser;
use thumbgen::application::{ServerConfig, serve};
use thumbgen::infrastructure::client::ThumbgenClient;
use thumbgen::infrastructure::generation::{GenerationConfig, ResponseSchema};
use thumbgen::presentation::cli::{Cli, Commands, ServeCommand, thumbnails};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cmd).await,
        Commands::Generate(cmd) => {
            let client = ThumbgenClient::from_base_url(&cli.api_url)?;
            thumbnails::generate(&client, cmd).await
        }
        Commands::Stats => {
            let client = ThumbgenClient::from_base_url(&cli.api_url)?;
            thumbnails::stats(&client).await
        }
        Commands::Fetch(cmd) => {
            let client = ThumbgenClient::from_base_url(&cli.api_url)?;
            thumbnails::fetch(&client, cmd).await
        }
    }
}

async fn run_server(command: ServeCommand) -> Result<()> {
    let schema = command
        .response_schema
        .parse::<ResponseSchema>()
        .map_err(|err| anyhow::anyhow!(err))?;

    let generation_api_key = command.generation_api_key.unwrap_or_default();
    if generation_api_key.is_empty() {
        tracing::warn!("no generation API key configured, remote requests will be rejected");
    }

    let config = ServerConfig {
        bind_address: command.bind_address,
        generation: GenerationConfig {
            url: command.generation_url,
            api_key: generation_api_key,
            model: command.generation_model,
            schema,
        },
        stats_path: command.stats_file,
        storage_dir: command.storage_dir,
        font_path: command.font_path,
    };

    serve(config).await
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
