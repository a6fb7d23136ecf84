//! Schema definitions for RON seed files

pub mod fruit;
pub mod person;

pub use fruit::FruitDef;
pub use person::PersonDef;
