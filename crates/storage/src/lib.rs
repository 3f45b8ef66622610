//! Storage layer for fauna-catalog
//!
//! One async trait, [`AnimalStore`], with two backends: a PostgREST table
//! client spoken over HTTP and, behind the `postgres` feature, a direct
//! sqlx connection pool.

mod error;
#[cfg(feature = "postgres")]
mod pg_storage;
mod rest_store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod traits;

pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
pub use rest_store::RestStore;
pub use traits::AnimalStore;
