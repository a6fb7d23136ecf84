//! Database models for persistent storage.

mod fruit;
mod person;

pub use fruit::*;
pub use person::*;
