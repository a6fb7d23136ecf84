//! Person model for database storage.

use super::StoredFruit;
use crate::collection::Persisted;
use crate::error::{Error, Result};
use native_db::*;
use native_model::{native_model, Model};
use orchard_core::{Document, ObjectId, Person};
use serde::{Deserialize, Serialize};

/// Stored person in the `people` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredPerson {
    /// Primary key - hex object id.
    #[primary_key]
    pub id: String,
    pub name: Option<String>,
    pub age: Option<f64>,
    /// Embedded by value; not a key into the fruits collection.
    pub favorite_fruit: Option<StoredFruit>,
}

impl StoredPerson {
    /// Create from a person.
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.to_hex(),
            name: person.name.clone(),
            age: person.age,
            favorite_fruit: person.favorite_fruit.as_ref().map(StoredFruit::from_fruit),
        }
    }

    /// Convert to a person.
    pub fn to_person(&self) -> Result<Person> {
        let corrupt = |reason: String| Error::Corrupt {
            collection: Person::collection_name(),
            reason,
        };
        let id = self
            .id
            .parse::<ObjectId>()
            .map_err(|e| corrupt(e.to_string()))?;
        let favorite_fruit = match &self.favorite_fruit {
            Some(fruit) => Some(fruit.to_fruit().map_err(|e| corrupt(e.to_string()))?),
            None => None,
        };
        Ok(Person {
            id,
            name: self.name.clone(),
            age: self.age,
            favorite_fruit,
        })
    }
}

impl Persisted for Person {
    type Stored = StoredPerson;

    fn to_stored(&self) -> StoredPerson {
        StoredPerson::from_person(self)
    }

    fn from_stored(stored: StoredPerson) -> Result<Self> {
        stored.to_person()
    }
}
