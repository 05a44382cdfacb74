use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use research_verifier::{
    config::{Config, LogFormat},
    export::{generate_export_document, render_export_to_text, save_export},
    pipeline::run_full_pipeline,
};

/// Run the research verification pipeline for one request.
#[derive(Debug, Parser)]
#[command(name = "research-verifier", version, about)]
struct Cli {
    /// The research request to process. Reads stdin when omitted.
    request: Option<String>,

    /// Write the rendered export to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Print the full session record as JSON instead of the text export.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "research verifier starting"
    );

    let request = match cli.request {
        Some(r) => r,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if let Err(e) = config.validate_request(&request) {
        error!(error = %e, "request rejected");
        return Err(e.into());
    }

    let session = run_full_pipeline(&request);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    match cli.out {
        Some(path) => {
            save_export(&session, &path)?;
            info!(path = %path.display(), "export saved");
        }
        None => {
            let doc = generate_export_document(&session);
            println!("{}", render_export_to_text(&doc));
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
