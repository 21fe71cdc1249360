use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "llm-reader-rust",
    version,
    about = "Article extraction and sentence translation API for reading apps"
)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(short = 'a', long = "addr", default_value = "127.0.0.1:8787")]
    addr: String,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Enable debug logging (includes raw model replies)
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    llm_reader_rust::logging::init(cli.verbose)?;

    let settings_path = cli.read_settings.as_deref().map(Path::new);
    let settings = llm_reader_rust::settings::load_settings(settings_path)?;

    info!("listening on {}", cli.addr);
    llm_reader_rust::server::run_server(settings, cli.addr).await
}
