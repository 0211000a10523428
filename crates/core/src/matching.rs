//! "Exactly one row" lookups.
//!
//! Lookups by id must resolve to a single row. Zero rows is a not-found,
//! more than one is an ambiguous match; both are errors distinct from
//! internal faults.

use crate::error::CoreError;
use crate::types::DbId;

/// Reduce the rows matched by an id lookup to the single expected row.
pub fn single_match<T>(mut rows: Vec<T>, entity: &'static str, id: DbId) -> Result<T, CoreError> {
    match rows.len() {
        0 => Err(CoreError::NotFound { entity, id }),
        1 => Ok(rows.remove(0)),
        count => Err(CoreError::Ambiguous { entity, id, count }),
    }
}
