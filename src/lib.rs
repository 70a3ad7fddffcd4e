pub mod api;
pub mod app;
pub mod command;
pub mod config;
pub mod controller;
pub mod session;
pub mod star;
pub mod view;

use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::app::{App, Outcome};
use crate::command::Command;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn run(config: config::Config) -> Result<(), ClientError> {
    let backend = api::HttpBackend::new(config.backend_url())?;
    info!("Using backend at {}", backend.base_url());
    if config.debug_logs {
        info!("Debug logging enabled");
    }

    let mut app = App::new(Arc::new(backend));
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", app.render())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match Command::parse(&line) {
            Ok(Some(cmd)) => {
                if app.handle(cmd, &mut stdout).await? == Outcome::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }

    info!("Exiting");
    Ok(())
}
