//! Orchard demo
//!
//! Connects to a fruits database, saves the sample fruits and people, deletes
//! the fruit named "Apple", prints every remaining fruit name, points John's
//! favourite fruit at a blueberry and closes the connection.
//!
//! ## Configuration
//!
//! Pass `--config <file.ron>` to read a configuration (see `orchard.ron`);
//! `--connection` overrides its connection string. Log verbosity follows
//! `RUST_LOG`, falling back to the configured `log_filter`.

use anyhow::{Context, Result};
use clap::Parser;
use orchard_db::Store;
use orchard_demo::DemoConfig;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "orchard_demo", about = "Run the orchard document store demo")]
struct Args {
    /// RON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Connection string, e.g. orchard://localhost/fruitsDB
    #[arg(long, value_name = "URL")]
    connection: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DemoConfig::default(),
    };
    if let Some(connection) = args.connection {
        config.connection = connection;
    }

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let conn = config.connection_string()?;
    let seed = config.load_seed()?;
    let store = Store::connect(&conn, &config.data_dir)
        .with_context(|| format!("connecting to {}", conn))?;

    let stdout = std::io::stdout();
    let report = orchard_demo::run(store, &seed, &mut stdout.lock())?;
    if !report.errors.is_empty() {
        warn!(errors = report.errors.len(), "finished with skipped errors");
    }

    Ok(())
}
