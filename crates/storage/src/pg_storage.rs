//! PostgreSQL storage backend using sqlx.

use async_trait::async_trait;
use fauna_core::{
    AnimalPage, AnimalRecord, AnimalUpdate, NewAnimal, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, PageWindow, env_parse_with_default,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::{AnimalStore, StorageError};

const COLUMNS: &str = "id, name, description, image_url, country, wikipedia_title";

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connects a pool. The `animals` table must already exist.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let max_connections =
            env_parse_with_default("FAUNA_PG_MAX_CONNECTIONS", PG_POOL_MAX_CONNECTIONS);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        tracing::info!(max_connections, "PgStorage initialized");
        Ok(Self { pool })
    }

    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub(crate) fn row_to_animal(row: &PgRow) -> Result<AnimalRecord, StorageError> {
    Ok(AnimalRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        country: row.try_get("country")?,
        wikipedia_title: row.try_get("wikipedia_title")?,
    })
}

fn not_found(id: i64) -> StorageError {
    StorageError::NotFound { entity: "animal", id: id.to_string() }
}

#[async_trait]
impl AnimalStore for PgStorage {
    async fn list_by_country(
        &self,
        country: &str,
        window: PageWindow,
    ) -> Result<AnimalPage, StorageError> {
        // The window count only exists on returned rows, so an empty page has no total.
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS}, COUNT(*) OVER () AS total
             FROM animals WHERE country = $1
             ORDER BY id ASC LIMIT $2 OFFSET $3"
        ))
        .bind(country)
        .bind(i64::try_from(window.limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(window.offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        let exact = match rows.first() {
            Some(row) => Some(u64::try_from(row.try_get::<i64, _>("total")?).unwrap_or(0)),
            None => None,
        };
        let animals = rows.iter().map(row_to_animal).collect::<Result<Vec<_>, _>>()?;
        Ok(AnimalPage::best_effort(animals, exact))
    }

    async fn insert(&self, rows: &[NewAnimal]) -> Result<Vec<AnimalRecord>, StorageError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "INSERT INTO animals (name, description, image_url, country, wikipedia_title) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(&row.name)
                .push_bind(&row.description)
                .push_bind(&row.image_url)
                .push_bind(&row.country)
                .push_bind(&row.wikipedia_title);
        });
        builder.push(" RETURNING ");
        builder.push(COLUMNS);
        let inserted = builder.build().fetch_all(&self.pool).await?;
        inserted.iter().map(row_to_animal).collect()
    }

    async fn get(&self, id: i64) -> Result<AnimalRecord, StorageError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM animals WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_animal(&r)).transpose()?.ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "animal delete");
        Ok(())
    }

    async fn update(&self, id: i64, changes: &AnimalUpdate) -> Result<AnimalRecord, StorageError> {
        if changes.is_empty() {
            return self.get(id).await;
        }
        // Only keys present in the update are assigned; a null writes NULL.
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE animals SET ");
        let mut assignments = builder.separated(", ");
        for (column, value) in changes.assignments() {
            assignments.push(format!("{column} = "));
            assignments.push_bind_unseparated(value);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {COLUMNS}"));
        let row = builder.build().fetch_optional(&self.pool).await?;
        row.map(|r| row_to_animal(&r)).transpose()?.ok_or_else(|| not_found(id))
    }
}
