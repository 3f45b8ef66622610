//! Client for the two encyclopedia endpoints the seeding job needs:
//! the MediaWiki `categorymembers` listing and the REST page summary.

mod client;
pub mod error;
mod types;

#[cfg(test)]
mod tests;

pub use client::{CATEGORY_PREFIX_VAR, WIKI_URL_VAR, WikiClient};
pub use error::WikiError;
pub use types::{CategoryMember, CategoryPage, PageSummary, Thumbnail};
