//! Connection strings naming a database.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// Where a database lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// `orchard://` - a database file under the data directory.
    File,
    /// `memory://` - discarded when the store is closed.
    Memory,
}

/// A parsed `scheme://host/database` target.
///
/// The store is embedded, so only local hosts are accepted. A port, if given,
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    raw: String,
    backend: Backend,
    database: String,
}

impl ConnectionString {
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Database name, e.g. `fruitsDB`.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Database file for a file-backed target.
    pub fn file_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{}.db", self.database))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn invalid(input: &str, reason: impl Into<String>) -> Error {
    Error::InvalidConnection {
        input: input.to_string(),
        reason: reason.into(),
    }
}

impl FromStr for ConnectionString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let url = Url::parse(s).map_err(|e| invalid(s, e.to_string()))?;

        let backend = match url.scheme() {
            "orchard" => Backend::File,
            "memory" => Backend::Memory,
            other => return Err(invalid(s, format!("unsupported scheme `{}`", other))),
        };

        match url.host_str().unwrap_or("") {
            "" | "localhost" | "127.0.0.1" => {}
            host => {
                return Err(invalid(
                    s,
                    format!("remote host `{}` is not supported by the embedded store", host),
                ))
            }
        }

        let database = url.path().trim_start_matches('/');
        if database.is_empty() {
            return Err(invalid(s, "missing database name"));
        }
        if !database
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(invalid(
                s,
                format!("database name `{}` may only contain letters, digits, `_` and `-`", database),
            ));
        }

        Ok(Self {
            raw: s.to_string(),
            backend,
            database: database.to_string(),
        })
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
