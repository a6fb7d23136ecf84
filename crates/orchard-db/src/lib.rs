//! Orchard DB - Document store layer using native_db
//!
//! Provides persistent storage for:
//! - Fruits (the `fruits` collection)
//! - People with an embedded favourite fruit (the `people` collection)
//!
//! A [`Store`] is opened from a [`ConnectionString`], hands out typed
//! [`Collection`]s, and is closed exactly once by consuming it.

mod collection;
mod connection;
mod error;
mod models;
mod store;

pub use collection::{Collection, Persisted};
pub use connection::{Backend, ConnectionString};
pub use error::{Error, Result};
pub use models::{StoredFruit, StoredPerson};
pub use store::Store;
