//! Orchard Core - document shapes for the orchard document store
//!
//! This crate provides the store-independent half of the object-document
//! mapping:
//! - Document identifiers (`ObjectId`)
//! - Dynamic value types (`Value`, `ValueMap`) for field lookup
//! - The `Document` trait and collection naming
//! - The `Fruit` and `Person` shapes with their validators
//! - Filters, typed updates and request outcomes

mod document;
mod error;
mod filter;
mod fruit;
mod identity;
mod outcome;
mod person;
mod value;

pub use document::{pluralize, Document, ID_FIELD};
pub use error::{Error, FieldError, FieldErrorKind, Result, ValidationError};
pub use filter::{Condition, Filter};
pub use fruit::{Fruit, FruitUpdate, NAME_REQUIRED_MESSAGE, RATING_MAX, RATING_MIN};
pub use identity::ObjectId;
pub use outcome::{DeleteResult, UpdateResult};
pub use person::{Person, PersonUpdate};
pub use value::{Value, ValueMap};
