//! Person definition schema

use serde::{Deserialize, Serialize};

/// Definition of a sample person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersonDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    /// Name of a fruit definition to embed a copy of
    #[serde(default)]
    pub favorite_fruit: Option<String>,
}

impl PersonDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_def_ron() {
        let ron_str = r#"
        (
            name: Some("Amy"),
            age: Some(12.0),
            favorite_fruit: Some("banana"),
        )
        "#;

        let def: PersonDef = ron::from_str(ron_str).unwrap();
        assert_eq!(def.name.as_deref(), Some("Amy"));
        assert_eq!(def.age, Some(12.0));
        assert_eq!(def.favorite_fruit.as_deref(), Some("banana"));
    }
}
