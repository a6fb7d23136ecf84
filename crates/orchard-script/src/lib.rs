//! Orchard Script - RON loader for sample data
//!
//! Loads sample documents from RON files:
//! - Fruit definitions
//! - Person definitions whose favourite fruit names a fruit definition
//!
//! [`SeedDefs::build`] turns the definitions into documents, embedding a copy
//! of each person's favourite fruit.

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{Loader, Seed, SeedDefs};
pub use schema::{FruitDef, PersonDef};
