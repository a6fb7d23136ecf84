//! RON seed loader

use crate::error::{Error, Result};
use crate::schema::{FruitDef, PersonDef};
use orchard_core::{Fruit, ObjectId, Person};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_SEED: &str = include_str!("../seed/default.ron");

/// Loaded sample definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedDefs {
    #[serde(default)]
    pub fruits: Vec<FruitDef>,
    #[serde(default)]
    pub people: Vec<PersonDef>,
}

impl SeedDefs {
    /// Create empty definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled sample data
    pub fn builtin() -> Result<Self> {
        let mut loader = Loader::new();
        loader.load_str(BUILTIN_SEED)?;
        Ok(loader.finish())
    }

    /// Get a fruit definition by name
    pub fn get_fruit(&self, name: &str) -> Option<&FruitDef> {
        self.fruits.iter().find(|f| f.name.as_deref() == Some(name))
    }

    /// Build the in-memory documents
    ///
    /// Each person's favourite fruit is a copy of the built fruit of that
    /// name, sharing its id.
    pub fn build(&self) -> Result<Seed> {
        let fruits: Vec<Fruit> = self.fruits.iter().map(FruitDef::to_fruit).collect();

        let mut people = Vec::with_capacity(self.people.len());
        for def in &self.people {
            let mut person = Person {
                id: ObjectId::new(),
                name: def.name.clone(),
                age: def.age,
                favorite_fruit: None,
            };
            if let Some(fruit_name) = &def.favorite_fruit {
                let fruit = fruits
                    .iter()
                    .find(|f| f.name() == fruit_name)
                    .ok_or_else(|| Error::UnknownFruit {
                        person: def.name.clone().unwrap_or_default(),
                        fruit: fruit_name.clone(),
                    })?;
                person = person.with_favorite_fruit(fruit);
            }
            people.push(person);
        }

        Ok(Seed { fruits, people })
    }
}

/// Sample documents ready to be saved
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub fruits: Vec<Fruit>,
    pub people: Vec<Person>,
}

impl Seed {
    /// Get a fruit by name
    pub fn fruit(&self, name: &str) -> Option<&Fruit> {
        self.fruits.iter().find(|f| f.name() == name)
    }

    /// Get a person by name
    pub fn person(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name() == name)
    }
}

/// Loader for RON seed files
pub struct Loader {
    defs: SeedDefs,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: SeedDefs::new(),
        }
    }

    /// Load definitions from a RON string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: SeedDefs = ron::from_str(content)?;

        for fruit in file.fruits {
            if let Some(name) = &fruit.name {
                if self.defs.get_fruit(name).is_some() {
                    return Err(Error::DuplicateDefinition(name.clone()));
                }
            }
            self.defs.fruits.push(fruit);
        }
        self.defs.people.extend(file.people);
        Ok(())
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading seed file");
        let content = fs::read_to_string(path)?;
        self.load_str(&content)
    }

    /// Load all RON files from a directory, in file name order
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.is_dir() {
                self.load_directory(&file_path)?;
            } else if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            }
        }

        Ok(())
    }

    /// Load a file or, for a directory, every RON file beneath it
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.is_dir() {
            self.load_directory(path)
        } else {
            self.load_file(path)
        }
    }

    /// Finish loading and return the definitions
    pub fn finish(self) -> SeedDefs {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &SeedDefs {
        &self.defs
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchard_core::Document;

    #[test]
    fn test_builtin_seed() {
        let defs = SeedDefs::builtin().unwrap();
        let names: Vec<_> = defs.fruits.iter().filter_map(|f| f.name.as_deref()).collect();
        assert_eq!(names, vec!["Apple", "banana", "kiwi", "blueberry"]);
        assert_eq!(defs.people.len(), 1);

        let seed = defs.build().unwrap();
        assert!(seed.fruits.iter().all(|f| f.validate().is_ok()));
        let amy = seed.person("Amy").unwrap();
        assert_eq!(amy.age, Some(12.0));
        assert_eq!(amy.favorite_fruit.as_ref(), seed.fruit("banana"));
    }

    #[test]
    fn test_load_str_merges() {
        let mut loader = Loader::new();
        loader
            .load_str(r#"(fruits: [(name: Some("kiwi"))])"#)
            .unwrap();
        loader
            .load_str(r#"(people: [(name: Some("John"), age: Some(37.0))])"#)
            .unwrap();

        let defs = loader.finish();
        assert!(defs.get_fruit("kiwi").is_some());
        assert_eq!(defs.people[0].name.as_deref(), Some("John"));
    }

    #[test]
    fn test_duplicate_fruit() {
        let mut loader = Loader::new();
        loader.load_str(r#"(fruits: [(name: Some("kiwi"))])"#).unwrap();
        let err = loader
            .load_str(r#"(fruits: [(name: Some("kiwi"))])"#)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(ref name) if name == "kiwi"));

        // unnamed fruits never collide
        loader
            .load_str(r#"(fruits: [(name: None), (rating: Some(2.0))])"#)
            .unwrap();
        assert_eq!(loader.defs().fruits.len(), 3);
    }

    #[test]
    fn test_unknown_favourite() {
        let mut loader = Loader::new();
        loader
            .load_str(r#"(people: [(name: Some("Amy"), favorite_fruit: Some("durian"))])"#)
            .unwrap();
        let err = loader.finish().build().unwrap_err();
        assert!(matches!(err, Error::UnknownFruit { ref fruit, .. } if fruit == "durian"));
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a_fruits.ron"),
            r#"(fruits: [(name: Some("banana"), rating: Some(10.0))])"#,
        )
        .unwrap();
        let nested = dir.path().join("more");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join("people.ron"),
            r#"(people: [(name: Some("Amy"), favorite_fruit: Some("banana"))])"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut loader = Loader::new();
        loader.load_path(dir.path()).unwrap();
        let seed = loader.finish().build().unwrap();
        assert_eq!(seed.fruits.len(), 1);
        assert_eq!(
            seed.person("Amy").and_then(|p| p.favorite_fruit.as_ref()).map(|f| f.name()),
            Some("banana")
        );
    }

    #[test]
    fn test_missing_directory() {
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_directory("/definitely/not/here"),
            Err(Error::Io(_))
        ));
    }
}
