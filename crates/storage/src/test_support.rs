//! Test utilities for store consumers.
//!
//! [`MemoryStore`] is an in-process [`AnimalStore`] that mimics the table's
//! constraints: ids are assigned in ascending order, `name` and `country` are
//! required, `wikipedia_title` is unique, and a batch with any violation is
//! rejected as a whole.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use fauna_core::{AnimalPage, AnimalRecord, AnimalUpdate, NewAnimal, PageWindow};

use crate::error::SINGLE_ROW_MISSING_CODE;
use crate::{AnimalStore, StorageError};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<AnimalRecord>,
    insert_calls: usize,
    fail_inserts: Option<String>,
}

/// Stub `AnimalStore` backed by a vector.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following insert fail with a non-duplicate rejection.
    pub fn fail_inserts_with(&self, message: impl Into<String>) {
        self.lock().fail_inserts = Some(message.into());
    }

    /// Snapshot of all rows in id order.
    #[must_use]
    pub fn rows(&self) -> Vec<AnimalRecord> {
        self.lock().rows.clone()
    }

    /// Number of `insert` calls received, including rejected ones.
    #[must_use]
    pub fn insert_calls(&self) -> usize {
        self.lock().insert_calls
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_null(column: &str) -> StorageError {
    StorageError::rejected(
        400,
        Some("23502".to_owned()),
        format!(
            "null value in column \"{column}\" of relation \"animals\" \
             violates not-null constraint"
        ),
    )
}

/// What PostgREST answers when a single-object read matches no row.
fn not_found(id: i64) -> StorageError {
    tracing::debug!(id, "single-row lookup matched nothing");
    StorageError::rejected(
        406,
        Some(SINGLE_ROW_MISSING_CODE.to_owned()),
        "Cannot coerce the result to a single JSON object".to_owned(),
    )
}

#[async_trait]
impl AnimalStore for MemoryStore {
    async fn list_by_country(
        &self,
        country: &str,
        window: PageWindow,
    ) -> Result<AnimalPage, StorageError> {
        let table = self.lock();
        let matching: Vec<&AnimalRecord> =
            table.rows.iter().filter(|r| r.country == country).collect();
        let total = matching.len() as u64;
        let animals =
            matching.into_iter().skip(window.offset).take(window.limit).cloned().collect();
        Ok(AnimalPage::best_effort(animals, Some(total)))
    }

    async fn insert(&self, rows: &[NewAnimal]) -> Result<Vec<AnimalRecord>, StorageError> {
        let mut table = self.lock();
        table.insert_calls += 1;
        if let Some(message) = table.fail_inserts.clone() {
            return Err(StorageError::rejected(500, Some("XX000".to_owned()), message));
        }

        let mut staged = Vec::with_capacity(rows.len());
        let mut next_id = table.next_id;
        for row in rows {
            let name = row.name.clone().ok_or_else(|| not_null("name"))?;
            let country = row.country.clone().ok_or_else(|| not_null("country"))?;
            if let Some(title) = row.wikipedia_title.as_deref() {
                let taken = table
                    .rows
                    .iter()
                    .chain(staged.iter())
                    .any(|r: &AnimalRecord| r.wikipedia_title.as_deref() == Some(title));
                if taken {
                    return Err(StorageError::rejected(
                        409,
                        Some("23505".to_owned()),
                        format!(
                            "duplicate key value violates unique constraint \
                             \"animals_wikipedia_title_key\" ({title})"
                        ),
                    ));
                }
            }
            next_id += 1;
            staged.push(AnimalRecord {
                id: next_id,
                name,
                description: row.description.clone(),
                image_url: row.image_url.clone(),
                country,
                wikipedia_title: row.wikipedia_title.clone(),
            });
        }

        table.next_id = next_id;
        table.rows.extend(staged.iter().cloned());
        Ok(staged)
    }

    async fn get(&self, id: i64) -> Result<AnimalRecord, StorageError> {
        self.lock().rows.iter().find(|r| r.id == id).cloned().ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        self.lock().rows.retain(|r| r.id != id);
        Ok(())
    }

    async fn update(&self, id: i64, changes: &AnimalUpdate) -> Result<AnimalRecord, StorageError> {
        let mut table = self.lock();
        let row = table.rows.iter_mut().find(|r| r.id == id).ok_or_else(|| not_found(id))?;
        if let Some(name) = &changes.name {
            row.name = name.clone().ok_or_else(|| not_null("name"))?;
        }
        if let Some(description) = &changes.description {
            row.description.clone_from(description);
        }
        if let Some(image_url) = &changes.image_url {
            row.image_url.clone_from(image_url);
        }
        Ok(row.clone())
    }
}
