//! Typed collections and the requests they accept.

use crate::error::{Error, Result};
use crate::store::Store;
use native_db::db_type::ToInput;
use orchard_core::{DeleteResult, Document, Filter, ObjectId, UpdateResult};
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// A document shape with a native_db model behind it.
pub trait Persisted: Document {
    /// Model written to the database.
    type Stored: ToInput + Clone;

    fn to_stored(&self) -> Self::Stored;

    fn from_stored(stored: Self::Stored) -> Result<Self>;
}

/// Handle on the collection storing `D`.
///
/// Every request runs in its own transaction and returns once it has been
/// committed.
pub struct Collection<'s, D> {
    store: &'s Store,
    name: String,
    _marker: PhantomData<D>,
}

impl<'s, D: Persisted> Collection<'s, D> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Self {
            store,
            name: D::collection_name(),
            _marker: PhantomData,
        }
    }

    /// Collection name, e.g. `fruits`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate and write a document, replacing any document with the same id.
    pub fn save(&self, doc: &D) -> Result<D> {
        if let Err(e) = doc.validate() {
            warn!(collection = %self.name, id = %doc.id(), error = %e, "save rejected");
            return Err(e.into());
        }
        let rw = self.store.db.rw_transaction()?;
        rw.upsert(doc.to_stored())?;
        rw.commit()?;
        debug!(collection = %self.name, id = %doc.id(), "saved");
        Ok(doc.clone())
    }

    /// Insert a batch atomically.
    ///
    /// Every document is validated before anything is written; a duplicate id,
    /// within the batch or already stored, aborts the whole batch.
    pub fn insert_many(&self, docs: &[D]) -> Result<Vec<D>> {
        for doc in docs {
            doc.validate()?;
        }

        let rw = self.store.db.rw_transaction()?;
        let mut seen = HashSet::new();
        for doc in docs {
            let key = doc.id().to_hex();
            if !seen.insert(key.clone()) || rw.get().primary::<D::Stored>(key.clone())?.is_some() {
                return Err(Error::DuplicateKey(key));
            }
            rw.insert(doc.to_stored())?;
        }
        rw.commit()?;
        debug!(collection = %self.name, count = docs.len(), "inserted batch");
        Ok(docs.to_vec())
    }

    /// All documents matching `filter`, in creation order.
    pub fn find(&self, filter: &Filter) -> Result<Vec<D>> {
        let docs = self.matching(filter)?;
        debug!(collection = %self.name, matched = docs.len(), "find");
        Ok(docs)
    }

    /// First document matching `filter`.
    pub fn find_one(&self, filter: &Filter) -> Result<Option<D>> {
        Ok(self.matching(filter)?.into_iter().next())
    }

    /// Document with the given id.
    pub fn find_by_id(&self, id: &ObjectId) -> Result<Option<D>> {
        let r = self.store.db.r_transaction()?;
        let stored: Option<D::Stored> = r.get().primary(id.to_hex())?;
        stored.map(D::from_stored).transpose()
    }

    /// Number of documents matching `filter`.
    pub fn count(&self, filter: &Filter) -> Result<usize> {
        Ok(self.matching(filter)?.len())
    }

    /// Delete the first document matching `filter`.
    pub fn delete_one(&self, filter: &Filter) -> Result<DeleteResult> {
        let mut targets = self.matching(filter)?;
        targets.truncate(1);
        self.delete_docs(&targets)
    }

    /// Delete every document matching `filter`.
    pub fn delete_many(&self, filter: &Filter) -> Result<DeleteResult> {
        let targets = self.matching(filter)?;
        self.delete_docs(&targets)
    }

    /// Apply `update` to the first document matching `filter`.
    ///
    /// A filter matching nothing writes nothing and reports zero counts.
    pub fn update_one(&self, filter: &Filter, update: &D::Update) -> Result<UpdateResult> {
        let mut targets = self.matching(filter)?;
        targets.truncate(1);
        self.update_docs(&targets, update)
    }

    /// Apply `update` to every document matching `filter`.
    pub fn update_many(&self, filter: &Filter, update: &D::Update) -> Result<UpdateResult> {
        let targets = self.matching(filter)?;
        self.update_docs(&targets, update)
    }

    fn matching(&self, filter: &Filter) -> Result<Vec<D>> {
        let r = self.store.db.r_transaction()?;
        let scan = r.scan().primary::<D::Stored>()?;
        let iter = scan.all()?;
        let stored: std::result::Result<Vec<D::Stored>, _> = iter.collect();
        let stored = stored.map_err(|e| Error::Database(e.to_string()))?;

        let mut docs = Vec::new();
        for item in stored {
            let doc = D::from_stored(item)?;
            if filter.matches(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    fn delete_docs(&self, targets: &[D]) -> Result<DeleteResult> {
        let rw = self.store.db.rw_transaction()?;
        let mut deleted_count = 0;
        for doc in targets {
            if let Some(stored) = rw.get().primary::<D::Stored>(doc.id().to_hex())? {
                rw.remove(stored)?;
                deleted_count += 1;
            }
        }
        rw.commit()?;
        debug!(collection = %self.name, deleted = deleted_count, "delete");
        Ok(DeleteResult { deleted_count })
    }

    fn update_docs(&self, targets: &[D], update: &D::Update) -> Result<UpdateResult> {
        let rw = self.store.db.rw_transaction()?;
        let mut result = UpdateResult::default();
        for target in targets {
            let Some(stored) = rw.get().primary::<D::Stored>(target.id().to_hex())? else {
                continue;
            };
            result.matched_count += 1;

            let mut doc = D::from_stored(stored)?;
            if doc.apply(update) {
                // validators run on the updated document; nothing is committed on failure
                doc.validate()?;
                rw.upsert(doc.to_stored())?;
                result.modified_count += 1;
            }
        }
        rw.commit()?;
        debug!(collection = %self.name, %result, "update");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchard_core::{
        Condition, FieldErrorKind, Fruit, FruitUpdate, Person, PersonUpdate, Value,
        NAME_REQUIRED_MESSAGE,
    };

    fn names(fruits: &[Fruit]) -> Vec<&str> {
        fruits.iter().map(|f| f.name()).collect()
    }

    #[test]
    fn test_save_and_find() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();
        assert_eq!(fruits.name(), "fruits");

        let apple = Fruit::new("Apple").with_rating(7.0).with_review("Pretty solid fruit.");
        fruits.save(&apple).unwrap();

        let found = fruits.find_by_id(&apple.id).unwrap().unwrap();
        assert_eq!(found, apple);
        assert_eq!(fruits.find_one(&Filter::by_name("Apple")).unwrap(), Some(apple));
        assert_eq!(fruits.find_one(&Filter::by_name("Pear")).unwrap(), None);
    }

    #[test]
    fn test_save_is_upsert() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();

        let mut kiwi = Fruit::new("kiwi").with_rating(6.0);
        fruits.save(&kiwi).unwrap();
        kiwi.rating = Some(7.0);
        fruits.save(&kiwi).unwrap();

        let all = fruits.find(&Filter::all()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].rating, Some(7.0));
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();

        for rating in [0.0, 0.5, 10.5, 11.0] {
            let err = fruits.save(&Fruit::new("odd").with_rating(rating)).unwrap_err();
            let Error::Validation(err) = err else {
                panic!("expected validation error, got {err:?}");
            };
            assert_eq!(err.errors[0].path, "rating");
        }
        assert_eq!(fruits.count(&Filter::all()).unwrap(), 0);
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();

        for fruit in [Fruit::unnamed().with_rating(5.0), Fruit::new("")] {
            match fruits.save(&fruit) {
                Err(Error::Validation(err)) => {
                    assert_eq!(err.errors[0].kind, FieldErrorKind::Required);
                    assert_eq!(err.errors[0].message, NAME_REQUIRED_MESSAGE);
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert_eq!(fruits.count(&Filter::all()).unwrap(), 0);
    }

    #[test]
    fn test_delete_one_counts() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();
        fruits.save(&Fruit::new("Apple").with_rating(7.0)).unwrap();
        fruits.save(&Fruit::new("kiwi")).unwrap();

        let first = fruits.delete_one(&Filter::by_name("Apple")).unwrap();
        assert_eq!(first.deleted_count, 1);
        let second = fruits.delete_one(&Filter::by_name("Apple")).unwrap();
        assert_eq!(second.deleted_count, 0);
        assert_eq!(names(&fruits.find(&Filter::all()).unwrap()), vec!["kiwi"]);
    }

    #[test]
    fn test_delete_one_removes_only_first_match() {
        let store = Store::in_memory().unwrap();
        let people = store.collection::<Person>();
        let first = Person::new("John").with_age(37.0);
        let second = Person::new("John").with_age(40.0);
        people.insert_many(&[first.clone(), second.clone()]).unwrap();

        assert_eq!(people.delete_one(&Filter::by_name("John")).unwrap().deleted_count, 1);
        let left = people.find(&Filter::all()).unwrap();
        assert_eq!(left, vec![second]);

        people.save(&first).unwrap();
        assert_eq!(people.delete_many(&Filter::by_name("John")).unwrap().deleted_count, 2);
        assert_eq!(people.count(&Filter::all()).unwrap(), 0);
    }

    #[test]
    fn test_find_returns_non_deleted_in_creation_order() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();

        fruits.save(&Fruit::new("Apple").with_rating(7.0)).unwrap();
        fruits
            .insert_many(&[
                Fruit::new("banana").with_rating(10.0),
                Fruit::new("kiwi").with_rating(6.0),
            ])
            .unwrap();
        fruits.save(&Fruit::new("blueberry").with_rating(9.0)).unwrap();

        fruits.delete_one(&Filter::by_name("Apple")).unwrap();
        let all = fruits.find(&Filter::all()).unwrap();
        assert_eq!(names(&all), vec!["banana", "kiwi", "blueberry"]);
    }

    #[test]
    fn test_find_with_conditions() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();
        fruits
            .insert_many(&[
                Fruit::new("banana").with_rating(10.0),
                Fruit::new("kiwi").with_rating(6.0),
                Fruit::new("blueberry").with_rating(9.0),
            ])
            .unwrap();

        let top = Filter::all().and("rating", Condition::Gte(Value::Int(9)));
        assert_eq!(names(&fruits.find(&top).unwrap()), vec!["banana", "blueberry"]);
        assert_eq!(fruits.count(&top).unwrap(), 2);
    }

    #[test]
    fn test_insert_many_is_all_or_nothing() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();

        let err = fruits
            .insert_many(&[Fruit::new("banana"), Fruit::new("kiwi").with_rating(60.0)])
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(fruits.count(&Filter::all()).unwrap(), 0);

        let kiwi = Fruit::new("kiwi");
        fruits.save(&kiwi).unwrap();
        let err = fruits
            .insert_many(&[Fruit::new("banana"), kiwi.clone()])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(ref key) if *key == kiwi.id.to_hex()));
        assert_eq!(names(&fruits.find(&Filter::all()).unwrap()), vec!["kiwi"]);

        let lime = Fruit::new("lime");
        let err = fruits.insert_many(&[lime.clone(), lime]).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
        assert_eq!(fruits.count(&Filter::all()).unwrap(), 1);
    }

    #[test]
    fn test_update_one() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();
        let banana = Fruit::new("banana").with_rating(10.0).with_review("Best.");
        fruits.save(&banana).unwrap();

        let result = fruits
            .update_one(&Filter::by_name("banana"), &FruitUpdate::new().rating(8.0))
            .unwrap();
        assert_eq!(result, UpdateResult { matched_count: 1, modified_count: 1 });

        let again = fruits
            .update_one(&Filter::by_name("banana"), &FruitUpdate::new().rating(8.0))
            .unwrap();
        assert_eq!(again, UpdateResult { matched_count: 1, modified_count: 0 });

        let stored = fruits.find_by_id(&banana.id).unwrap().unwrap();
        assert_eq!(stored.rating, Some(8.0));
        assert_eq!(stored.review.as_deref(), Some("Best."));
    }

    #[test]
    fn test_update_runs_validators() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();
        let kiwi = Fruit::new("kiwi").with_rating(6.0);
        fruits.save(&kiwi).unwrap();

        let err = fruits
            .update_one(&Filter::by_name("kiwi"), &FruitUpdate::new().rating(12.0))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(fruits.find_by_id(&kiwi.id).unwrap().unwrap().rating, Some(6.0));
    }

    #[test]
    fn test_update_without_match_creates_nothing() {
        let store = Store::in_memory().unwrap();
        let people = store.collection::<Person>();
        let banana = Fruit::new("banana").with_rating(10.0);
        people
            .save(&Person::new("Amy").with_age(12.0).with_favorite_fruit(&banana))
            .unwrap();

        let blueberry = Fruit::new("blueberry").with_rating(9.0);
        let result = people
            .update_one(
                &Filter::by_name("John"),
                &PersonUpdate::new().favorite_fruit(&blueberry),
            )
            .unwrap();
        assert_eq!(result, UpdateResult::default());
        assert_eq!(people.count(&Filter::all()).unwrap(), 1);
        assert_eq!(people.count(&Filter::by_name("John")).unwrap(), 0);
    }

    #[test]
    fn test_update_many() {
        let store = Store::in_memory().unwrap();
        let people = store.collection::<Person>();
        people
            .insert_many(&[
                Person::new("John").with_age(37.0),
                Person::new("John").with_age(40.0),
                Person::new("Amy").with_age(12.0),
            ])
            .unwrap();

        let result = people
            .update_many(&Filter::by_name("John"), &PersonUpdate::new().age(41.0))
            .unwrap();
        assert_eq!(result, UpdateResult { matched_count: 2, modified_count: 2 });
        assert_eq!(people.count(&Filter::eq("age", 41i64)).unwrap(), 2);
    }

    #[test]
    fn test_embedded_fruit_is_a_copy() {
        let store = Store::in_memory().unwrap();
        let fruits = store.collection::<Fruit>();
        let people = store.collection::<Person>();

        let mut banana = Fruit::new("banana").with_rating(10.0).with_review("Best.");
        fruits.save(&banana).unwrap();
        let amy = Person::new("Amy").with_age(12.0).with_favorite_fruit(&banana);
        people.save(&amy).unwrap();

        // change the original, both in memory and in its own collection
        banana.rating = Some(2.0);
        fruits
            .update_one(&Filter::by_name("banana"), &FruitUpdate::new().review("Meh."))
            .unwrap();

        let stored = people.find_by_id(&amy.id).unwrap().unwrap();
        let embedded = stored.favorite_fruit.unwrap();
        assert_eq!(embedded.rating, Some(10.0));
        assert_eq!(embedded.review.as_deref(), Some("Best."));

        fruits.delete_many(&Filter::all()).unwrap();
        let stored = people.find_one(&Filter::eq("favoriteFruit.name", "banana")).unwrap();
        assert!(stored.is_some());
    }

    #[test]
    fn test_person_with_invalid_embedded_fruit() {
        let store = Store::in_memory().unwrap();
        let people = store.collection::<Person>();
        let amy = Person::new("Amy").with_favorite_fruit(&Fruit::unnamed());

        match people.save(&amy) {
            Err(Error::Validation(err)) => {
                assert_eq!(err.model, "Person");
                assert_eq!(err.errors[0].path, "favoriteFruit.name");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
