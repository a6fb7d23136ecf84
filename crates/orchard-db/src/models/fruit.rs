//! Fruit model for database storage.

use crate::collection::Persisted;
use crate::error::{Error, Result};
use native_db::*;
use native_model::{native_model, Model};
use orchard_core::{Document, Fruit, ObjectId};
use serde::{Deserialize, Serialize};

/// Stored fruit in the `fruits` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredFruit {
    /// Primary key - hex object id.
    #[primary_key]
    pub id: String,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub review: Option<String>,
}

impl StoredFruit {
    /// Create from a fruit.
    pub fn from_fruit(fruit: &Fruit) -> Self {
        Self {
            id: fruit.id.to_hex(),
            name: fruit.name.clone(),
            rating: fruit.rating,
            review: fruit.review.clone(),
        }
    }

    /// Convert to a fruit.
    pub fn to_fruit(&self) -> Result<Fruit> {
        let id = self.id.parse::<ObjectId>().map_err(|e| Error::Corrupt {
            collection: Fruit::collection_name(),
            reason: e.to_string(),
        })?;
        Ok(Fruit {
            id,
            name: self.name.clone(),
            rating: self.rating,
            review: self.review.clone(),
        })
    }
}

impl Persisted for Fruit {
    type Stored = StoredFruit;

    fn to_stored(&self) -> StoredFruit {
        StoredFruit::from_fruit(self)
    }

    fn from_stored(stored: StoredFruit) -> Result<Self> {
        stored.to_fruit()
    }
}
