//! Database store wrapper.

use crate::collection::{Collection, Persisted};
use crate::connection::{Backend, ConnectionString};
use crate::error::{Error, Result};
use crate::models::*;
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models
        .define::<StoredFruit>()
        .expect("StoredFruit model definition");
    models
        .define::<StoredPerson>()
        .expect("StoredPerson model definition");
    models
});

/// An open connection to one database.
///
/// Dropping or [closing](Store::close) the store releases the database.
pub struct Store {
    pub(crate) db: Database<'static>,
    name: String,
}

impl Store {
    /// Open the database a connection string names.
    ///
    /// File-backed databases live in `data_dir`, which is created if absent;
    /// the database file is created on first use.
    pub fn connect(conn: &ConnectionString, data_dir: impl AsRef<Path>) -> Result<Self> {
        let store = match conn.backend() {
            Backend::Memory => Self::in_memory_named(conn.database())?,
            Backend::File => {
                let data_dir = data_dir.as_ref();
                std::fs::create_dir_all(data_dir)?;
                let path = conn.file_path(data_dir);
                debug!(path = %path.display(), "opening database file");
                Self::open_named(&path, conn.database())?
            }
        };
        info!(connection = %conn, database = %store.name, "connected");
        Ok(store)
    }

    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("orchard")
            .to_string();
        Self::open_named(path, &name)
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::in_memory_named("memory")
    }

    fn open_named(path: &Path, name: &str) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self {
            db,
            name: name.to_string(),
        })
    }

    fn in_memory_named(name: &str) -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self {
            db,
            name: name.to_string(),
        })
    }

    /// Database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Typed handle on the collection storing `D`.
    pub fn collection<D: Persisted>(&self) -> Collection<'_, D> {
        Collection::new(self)
    }

    /// Close the connection.
    pub fn close(self) {
        info!(database = %self.name, "connection closed");
    }
}
