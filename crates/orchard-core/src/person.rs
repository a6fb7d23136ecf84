//! The `Person` shape

use crate::document::{Document, ID_FIELD};
use crate::error::ValidationError;
use crate::fruit::Fruit;
use crate::identity::ObjectId;
use crate::value::{Value, ValueMap};
use serde::{Deserialize, Serialize};

const FAVORITE_FRUIT: &str = "favoriteFruit";

/// A person with an embedded favourite fruit
///
/// `favorite_fruit` holds a copy of the fruit, not a reference to the fruits
/// collection; later changes to the original fruit are not seen here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id", default)]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(rename = "favoriteFruit", default)]
    pub favorite_fruit: Option<Fruit>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: Some(name.into()),
            age: None,
            favorite_fruit: None,
        }
    }

    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    /// Embed a copy of `fruit`
    pub fn with_favorite_fruit(mut self, fruit: &Fruit) -> Self {
        self.favorite_fruit = Some(fruit.clone());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

impl Document for Person {
    const MODEL_NAME: &'static str = "Person";

    type Update = PersonUpdate;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new(Self::MODEL_NAME);
        if let Some(fruit) = &self.favorite_fruit {
            for field in fruit.field_errors() {
                error.push(field.nested(FAVORITE_FRUIT));
            }
        }
        error.into_result()
    }

    fn to_value_map(&self) -> ValueMap {
        let mut map = ValueMap::new();
        map.insert(ID_FIELD.to_string(), Value::String(self.id.to_hex()));
        map.insert("name".to_string(), self.name.clone().into());
        map.insert("age".to_string(), self.age.into());
        map.insert(
            FAVORITE_FRUIT.to_string(),
            self.favorite_fruit
                .as_ref()
                .map(|f| Value::Map(f.to_value_map()))
                .unwrap_or(Value::Null),
        );
        map
    }

    fn apply(&mut self, update: &PersonUpdate) -> bool {
        let mut modified = false;
        if let Some(name) = &update.name {
            modified |= self.name.as_ref() != Some(name);
            self.name = Some(name.clone());
        }
        if let Some(age) = update.age {
            modified |= self.age != Some(age);
            self.age = Some(age);
        }
        if let Some(fruit) = &update.favorite_fruit {
            modified |= self.favorite_fruit.as_ref() != Some(fruit);
            self.favorite_fruit = Some(fruit.clone());
        }
        modified
    }
}

/// Field assignments for a person; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub favorite_fruit: Option<Fruit>,
}

impl PersonUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    /// Replace the embedded fruit with a copy of `fruit`
    pub fn favorite_fruit(mut self, fruit: &Fruit) -> Self {
        self.favorite_fruit = Some(fruit.clone());
        self
    }
}
