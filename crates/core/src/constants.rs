//! Shared constants for fauna-catalog.

/// Table holding the catalog rows.
pub const ANIMALS_TABLE: &str = "animals";

/// Page size for country listings when the caller gives none (or garbage).
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Maximum page size for a single listing (DoS protection).
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Default HTTP port of the API service.
pub const DEFAULT_HTTP_PORT: u16 = 4000;

/// Front-end origins allowed by the CORS policy unless overridden.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] =
    ["http://localhost:5173", "https://uniquemals.vercel.app"];

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// SQLSTATE for unique constraint violations.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Default encyclopedia host (Spanish Wikipedia).
pub const DEFAULT_WIKI_URL: &str = "https://es.wikipedia.org";

/// Category prefix; the country name (spaces as underscores) is appended.
pub const DEFAULT_CATEGORY_PREFIX: &str = "Categoría:Fauna_endémica_de_";

/// Members requested per category-listing page.
pub const CATEGORY_PAGE_SIZE: u32 = 100;
