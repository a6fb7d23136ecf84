//! The `Fruit` shape

use crate::document::{Document, ID_FIELD};
use crate::error::{FieldError, FieldErrorKind, ValidationError};
use crate::identity::ObjectId;
use crate::value::{Value, ValueMap};
use serde::{Deserialize, Serialize};

/// Message reported when a fruit has no name
pub const NAME_REQUIRED_MESSAGE: &str = "Please check your data entry, no name specified!";

/// Lowest accepted rating
pub const RATING_MIN: f64 = 1.0;

/// Highest accepted rating
pub const RATING_MAX: f64 = 10.0;

/// A rated fruit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    #[serde(rename = "_id", default)]
    pub id: ObjectId,
    /// Required, non-empty
    #[serde(default)]
    pub name: Option<String>,
    /// Within `RATING_MIN..=RATING_MAX` when present
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review: Option<String>,
}

impl Fruit {
    /// Create a named fruit with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: Some(name.into()),
            rating: None,
            review: None,
        }
    }

    /// Create a fruit without a name
    pub fn unnamed() -> Self {
        Self {
            id: ObjectId::new(),
            name: None,
            rating: None,
            review: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    /// Name, or the empty string when unset
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Field-level validators, with paths relative to the fruit
    pub(crate) fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name().is_empty() {
            errors.push(FieldError::new(
                "name",
                FieldErrorKind::Required,
                NAME_REQUIRED_MESSAGE,
            ));
        }

        if let Some(rating) = self.rating {
            if rating.is_nan() {
                errors.push(FieldError::new(
                    "rating",
                    FieldErrorKind::Cast,
                    "Cast to Number failed for value \"NaN\" at path `rating`",
                ));
            } else if rating < RATING_MIN {
                errors.push(FieldError::new(
                    "rating",
                    FieldErrorKind::Min,
                    format!(
                        "Path `rating` ({}) is less than minimum allowed value ({}).",
                        rating, RATING_MIN
                    ),
                ));
            } else if rating > RATING_MAX {
                errors.push(FieldError::new(
                    "rating",
                    FieldErrorKind::Max,
                    format!(
                        "Path `rating` ({}) is more than maximum allowed value ({}).",
                        rating, RATING_MAX
                    ),
                ));
            }
        }

        errors
    }
}

impl Document for Fruit {
    const MODEL_NAME: &'static str = "Fruit";

    type Update = FruitUpdate;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new(Self::MODEL_NAME);
        for field in self.field_errors() {
            error.push(field);
        }
        error.into_result()
    }

    fn to_value_map(&self) -> ValueMap {
        let mut map = ValueMap::new();
        map.insert(ID_FIELD.to_string(), Value::String(self.id.to_hex()));
        map.insert("name".to_string(), self.name.clone().into());
        map.insert("rating".to_string(), self.rating.into());
        map.insert("review".to_string(), self.review.clone().into());
        map
    }

    fn apply(&mut self, update: &FruitUpdate) -> bool {
        let mut modified = false;
        if let Some(name) = &update.name {
            modified |= self.name.as_ref() != Some(name);
            self.name = Some(name.clone());
        }
        if let Some(rating) = update.rating {
            modified |= self.rating != Some(rating);
            self.rating = Some(rating);
        }
        if let Some(review) = &update.review {
            modified |= self.review.as_ref() != Some(review);
            self.review = Some(review.clone());
        }
        modified
    }
}

/// Field assignments for a fruit; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FruitUpdate {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub review: Option<String>,
}

impl FruitUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }
}
