//! The demonstration sequence: seed, delete, find, update, close.

use orchard_core::{DeleteResult, Filter, Fruit, Person, PersonUpdate, UpdateResult};
use orchard_db::Store;
use orchard_script::Seed;
use std::fmt::Display;
use std::io::{self, Write};
use tracing::{error, info, warn};

/// Fruit removed by the delete step
pub const DELETE_TARGET: &str = "Apple";

/// Person the update step looks for
pub const UPDATE_TARGET: &str = "John";

/// Fruit embedded into the updated person
pub const UPDATE_FRUIT: &str = "blueberry";

/// What one run did
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunReport {
    pub saved_fruits: usize,
    pub saved_people: usize,
    pub deleted: Option<DeleteResult>,
    /// Names printed by the find step, in order
    pub fruit_names: Vec<String>,
    pub person_update: Option<UpdateResult>,
    /// Every error that was logged and skipped
    pub errors: Vec<String>,
}

impl RunReport {
    fn fail(&mut self, out: &mut impl Write, step: &str, err: impl Display) -> io::Result<()> {
        error!(step, error = %err, "request failed");
        writeln!(out, "{}", err)?;
        self.errors.push(err.to_string());
        Ok(())
    }
}

/// Run the sequence against `store`, printing results to `out`.
///
/// Store errors are printed and logged, then the next step runs. The store is
/// closed once every step has finished. Only a failing `out` aborts the run.
pub fn run(store: Store, seed: &Seed, out: &mut impl Write) -> io::Result<RunReport> {
    let mut report = RunReport::default();
    let fruits = store.collection::<Fruit>();
    let people = store.collection::<Person>();

    for fruit in &seed.fruits {
        match fruits.save(fruit) {
            Ok(_) => report.saved_fruits += 1,
            Err(e) => report.fail(out, "save fruit", e)?,
        }
    }

    if !seed.people.is_empty() {
        match people.insert_many(&seed.people) {
            Ok(saved) => report.saved_people = saved.len(),
            Err(e) => report.fail(out, "insert people", e)?,
        }
    }
    info!(
        fruits = report.saved_fruits,
        people = report.saved_people,
        "seeded"
    );

    match fruits.delete_one(&Filter::by_name(DELETE_TARGET)) {
        Ok(result) => {
            if result.deleted_count == 1 {
                writeln!(out, "{} was deleted.", DELETE_TARGET)?;
            } else {
                writeln!(
                    out,
                    "There was an error and {} was not deleted.",
                    DELETE_TARGET
                )?;
            }
            report.deleted = Some(result);
        }
        Err(e) => report.fail(out, "delete fruit", e)?,
    }

    match fruits.find(&Filter::all()) {
        Ok(found) => {
            for fruit in found {
                writeln!(out, "{}", fruit.name())?;
                report.fruit_names.push(fruit.name().to_string());
            }
        }
        Err(e) => report.fail(out, "find fruits", e)?,
    }

    match seed.fruit(UPDATE_FRUIT) {
        Some(fruit) => {
            let update = PersonUpdate::new().favorite_fruit(fruit);
            match people.update_one(&Filter::by_name(UPDATE_TARGET), &update) {
                Ok(result) => {
                    writeln!(out, "Successfully updated the document")?;
                    info!(person = UPDATE_TARGET, %result, "person update");
                    report.person_update = Some(result);
                }
                Err(e) => report.fail(out, "update person", e)?,
            }
        }
        None => warn!(fruit = UPDATE_FRUIT, "fruit missing from seed, person update skipped"),
    }

    store.close();
    Ok(report)
}
