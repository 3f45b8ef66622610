//! Per-country seeding loop.
//!
//! Strictly sequential: one outstanding request at a time, countries in list
//! order, members in listing order.

use std::sync::Arc;

use fauna_core::NewAnimal;
use fauna_storage::AnimalStore;
use fauna_wiki::{WikiClient, WikiError};

/// Rows collected for one country.
#[derive(Debug, Default)]
pub struct Harvest {
    pub rows: Vec<NewAnimal>,
    /// Members whose summary could not be fetched.
    pub skipped: usize,
    /// Listing failure that cut pagination short, if any.
    pub aborted: Option<WikiError>,
}

/// Result of the single bulk insert for a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Nothing harvested, no insert issued.
    Empty,
    Inserted(usize),
    /// The batch hit the `wikipedia_title` uniqueness constraint.
    AlreadyPresent,
    /// Any other store error; the batch was abandoned.
    Failed(String),
}

#[derive(Debug)]
pub struct CountryReport {
    pub country: String,
    pub found: usize,
    pub skipped: usize,
    pub listing_aborted: bool,
    pub outcome: InsertOutcome,
}

/// Totals over a whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub countries: usize,
    pub found: usize,
    pub inserted: usize,
    pub already_present: usize,
    pub failed: usize,
}

impl IngestSummary {
    fn record(&mut self, report: &CountryReport) {
        self.countries += 1;
        self.found += report.found;
        match report.outcome {
            InsertOutcome::Inserted(n) => self.inserted += n,
            InsertOutcome::AlreadyPresent => self.already_present += 1,
            InsertOutcome::Failed(_) => self.failed += 1,
            InsertOutcome::Empty => {},
        }
    }
}

pub struct Ingestor {
    wiki: WikiClient,
    store: Arc<dyn AnimalStore>,
}

impl Ingestor {
    #[must_use]
    pub fn new(wiki: WikiClient, store: Arc<dyn AnimalStore>) -> Self {
        Self { wiki, store }
    }

    /// Walks the country's category and fetches a summary per member.
    ///
    /// A listing failure stops pagination but keeps what was gathered; a
    /// summary failure drops only that member.
    pub async fn harvest(&self, country: &str) -> Harvest {
        let category = self.wiki.category_title(country);
        let mut harvest = Harvest::default();
        let mut cursor: Option<String> = None;

        loop {
            let page = match self.wiki.category_members(&category, cursor.as_deref()).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        country,
                        category = %category,
                        error = %e,
                        "category listing failed"
                    );
                    harvest.aborted = Some(e);
                    break;
                },
            };

            for member in &page.members {
                match self.wiki.page_summary(&member.title).await {
                    Ok(summary) => harvest.rows.push(NewAnimal::from_page(
                        country,
                        &member.title,
                        summary.description(),
                        summary.image_url(),
                    )),
                    Err(e) => {
                        tracing::warn!(
                            title = %member.title,
                            error = %e,
                            "could not fetch summary"
                        );
                        harvest.skipped += 1;
                    },
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        harvest
    }

    /// Bulk-inserts the batch, classifying the store's answer.
    pub async fn save(&self, country: &str, rows: &[NewAnimal]) -> InsertOutcome {
        if rows.is_empty() {
            return InsertOutcome::Empty;
        }
        match self.store.insert(rows).await {
            Ok(inserted) => {
                tracing::info!(country, inserted = inserted.len(), "inserted animals");
                InsertOutcome::Inserted(inserted.len())
            },
            Err(e) if e.is_duplicate() => {
                tracing::info!(
                    country,
                    detail = %e.backend_message(),
                    "some records already existed"
                );
                InsertOutcome::AlreadyPresent
            },
            Err(e) => {
                tracing::error!(country, error = %e, "insert failed, batch abandoned");
                InsertOutcome::Failed(e.backend_message())
            },
        }
    }

    pub async fn ingest_country(&self, country: &str) -> CountryReport {
        tracing::info!(country, "processing country");
        let harvest = self.harvest(country).await;
        tracing::info!(
            country,
            found = harvest.rows.len(),
            skipped = harvest.skipped,
            "harvested"
        );
        let outcome = self.save(country, &harvest.rows).await;
        CountryReport {
            country: country.to_owned(),
            found: harvest.rows.len(),
            skipped: harvest.skipped,
            listing_aborted: harvest.aborted.is_some(),
            outcome,
        }
    }

    /// Processes every country in order. Never aborts early.
    pub async fn run(&self, countries: &[String]) -> IngestSummary {
        let mut summary = IngestSummary::default();
        for country in countries {
            let report = self.ingest_country(country).await;
            summary.record(&report);
        }
        tracing::info!(
            countries = summary.countries,
            found = summary.found,
            inserted = summary.inserted,
            already_present = summary.already_present,
            failed = summary.failed,
            "ingestion finished"
        );
        summary
    }
}
