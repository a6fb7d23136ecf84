//! The document abstraction shared by every stored shape

use crate::error::ValidationError;
use crate::identity::ObjectId;
use crate::value::{Value, ValueMap};
use std::fmt::Debug;

/// Field name of the identifier in a document's value map
pub const ID_FIELD: &str = "_id";

/// A record shape that can live in a collection
///
/// Implementors declare their model name, validators and the typed update
/// they accept. Collection names are derived from the model name.
pub trait Document: Clone + Debug + Send + Sync + 'static {
    /// Singular model name, e.g. `Fruit`
    const MODEL_NAME: &'static str;

    /// Field assignments accepted by `update_one`/`update_many`
    type Update: Clone + Debug;

    /// Identifier of this document
    fn id(&self) -> &ObjectId;

    /// Run every validator declared for the shape
    fn validate(&self) -> Result<(), ValidationError>;

    /// Field view of the document, including `_id`
    fn to_value_map(&self) -> ValueMap;

    /// Apply an update in place; returns true if any field changed
    fn apply(&mut self, update: &Self::Update) -> bool;

    /// Collection this shape is stored in
    fn collection_name() -> String {
        pluralize(Self::MODEL_NAME)
    }

    /// Look up a field by dotted path; missing fields are `Null`
    fn get(&self, path: &str) -> Value {
        Value::Map(self.to_value_map())
            .lookup(path)
            .cloned()
            .unwrap_or(Value::Null)
    }
}

const UNCOUNTABLE: &[&str] = &[
    "advice",
    "deer",
    "equipment",
    "fish",
    "information",
    "jeans",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Lowercase plural of a model name, used as its collection name
pub fn pluralize(name: &str) -> String {
    let word = name.to_lowercase();

    if word.is_empty() || UNCOUNTABLE.contains(&word.as_str()) {
        return word;
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == word) {
        return plural.to_string();
    }
    if word.ends_with('s') && !word.ends_with("ss") {
        // already plural
        return word;
    }
    if ["ss", "sh", "ch", "x", "z"].iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{}ies", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{}ves", stem);
    }
    if let Some(stem) = word.strip_suffix('f') {
        if stem.ends_with(['l', 'r', 'a']) {
            return format!("{}ves", stem);
        }
    }
    format!("{}s", word)
}
