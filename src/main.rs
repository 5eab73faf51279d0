use clap::Parser;
use podterm::core::config::{CliOverrides, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "podterm", about = "Terminal UI for Podman containers")]
struct Args {
    /// Engine API URL (http://, https:// or tcp://)
    #[arg(short, long)]
    url: Option<String>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(short, long)]
    log_level: Option<String>,

    /// Config file to use instead of ~/.podterm/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = load_config(args.config.as_deref()).map_err(|e| {
        eprintln!("podterm: {e}");
        std::io::Error::other(e.to_string())
    })?;
    let config = resolve(
        &file_config,
        &CliOverrides {
            url: args.url,
            log_level: args.log_level,
        },
    );

    // File logger: stdout belongs to the terminal UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Debug);

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!(
        "podterm starting up against {} (api {})",
        config.engine_url,
        config.api_version
    );

    podterm::tui::run(config)
}
