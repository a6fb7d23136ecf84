//! Fruit definition schema

use orchard_core::Fruit;
use serde::{Deserialize, Serialize};

/// Definition of a sample fruit
///
/// Definitions are not validated on load; validators run when the built
/// document is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FruitDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review: Option<String>,
}

impl FruitDef {
    /// Create a named fruit definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Build the in-memory document, minting a fresh id
    pub fn to_fruit(&self) -> Fruit {
        let mut fruit = Fruit::unnamed();
        fruit.name = self.name.clone();
        fruit.rating = self.rating;
        fruit.review = self.review.clone();
        fruit
    }
}
