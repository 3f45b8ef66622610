//! Storage backend trait abstraction.

use async_trait::async_trait;
use fauna_core::{AnimalPage, AnimalRecord, AnimalUpdate, NewAnimal, PageWindow};

use crate::StorageError;

/// Single-statement operations on the `animals` table.
///
/// Each call maps to exactly one query against the backend; nothing is
/// cached or retried.
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Rows of one country, ascending by id, within `window`.
    async fn list_by_country(
        &self,
        country: &str,
        window: PageWindow,
    ) -> Result<AnimalPage, StorageError>;

    /// Insert all rows in one statement. Returns the rows as stored.
    ///
    /// A single duplicate `wikipedia_title` fails the whole batch with
    /// `StorageError::Duplicate`.
    async fn insert(&self, rows: &[NewAnimal]) -> Result<Vec<AnimalRecord>, StorageError>;

    /// Fetch one row. A missing id is an error for which
    /// [`StorageError::is_not_found`] holds.
    async fn get(&self, id: i64) -> Result<AnimalRecord, StorageError>;

    /// Delete one row. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<(), StorageError>;

    /// Apply `changes` and return the updated row. Missing ids fail as in `get`.
    async fn update(&self, id: i64, changes: &AnimalUpdate) -> Result<AnimalRecord, StorageError>;
}
