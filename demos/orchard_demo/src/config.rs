//! RON configuration for the demo

use orchard_db::ConnectionString;
use orchard_script::{Loader, Seed, SeedDefs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Database to connect to
    #[serde(default = "default_connection")]
    pub connection: String,
    /// Directory holding file-backed databases
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Default tracing filter; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Seed file or directory; the bundled sample data when unset
    #[serde(default)]
    pub seed: Option<PathBuf>,
}

fn default_connection() -> String {
    "orchard://localhost/fruitsDB".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            connection: default_connection(),
            data_dir: default_data_dir(),
            log_filter: default_log_filter(),
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_ron(&content)
    }

    /// Parse configuration from a RON string
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parsed connection target
    pub fn connection_string(&self) -> Result<ConnectionString, ConfigError> {
        Ok(self.connection.parse::<ConnectionString>()?)
    }

    /// Load and build the sample documents
    pub fn load_seed(&self) -> Result<Seed, ConfigError> {
        let defs = match &self.seed {
            Some(path) => {
                let mut loader = Loader::new();
                loader.load_path(path)?;
                loader.finish()
            }
            None => SeedDefs::builtin()?,
        };
        Ok(defs.build()?)
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Connection(#[from] orchard_db::Error),

    #[error("Seed error: {0}")]
    Seed(#[from] orchard_script::Error),
}
