//! Outcomes of write requests

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of `delete_one`/`delete_many`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deleted {}", self.deleted_count)
    }
}

/// Result of `update_one`/`update_many`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Documents matching the filter
    pub matched_count: u64,
    /// Matched documents whose fields actually changed
    pub modified_count: u64,
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matched {}, modified {}",
            self.matched_count, self.modified_count
        )
    }
}
