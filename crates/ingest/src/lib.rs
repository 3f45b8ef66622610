//! Offline seeding job: encyclopedia category listing → page summaries →
//! one bulk insert per country.

mod countries;
pub mod error;
mod pipeline;

#[cfg(test)]
mod pipeline_tests;

pub use countries::{countries_from_json, load_countries};
pub use error::IngestError;
pub use pipeline::{CountryReport, Harvest, IngestSummary, Ingestor, InsertOutcome};
