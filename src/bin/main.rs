use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movierec_client::config::{Config, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "movierec")]
#[command(about = "Terminal client for the movie recommendation service", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<String>,
    /// Backend base URL, overrides the config file.
    #[arg(short, long)]
    server: Option<String>,
    #[arg(short, long)]
    debug: bool,
}

fn init_tracing(config: &Config) -> std::io::Result<()> {
    let default_filter = if config.debug_logs {
        "movierec_client=debug"
    } else {
        "movierec_client=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let writer = match config.logfile.as_str() {
        "stdout" => BoxMakeWriter::new(std::io::stdout),
        "stderr" => BoxMakeWriter::new(std::io::stderr),
        path => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.logformat {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    config.debug_logs = args.debug;
    if let Some(server) = args.server {
        config.backend.url = server;
    }

    if let Err(e) = init_tracing(&config) {
        eprintln!("Error: cannot open log file {}: {}", config.logfile, e);
        std::process::exit(1);
    }

    if let Err(e) = movierec_client::run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
