use anyhow::{Result, bail};
use fauna_ingest::{Ingestor, load_countries};
use fauna_wiki::WikiClient;
use std::path::PathBuf;

use crate::open_store;

pub(crate) async fn run(countries_file: PathBuf, countries: Vec<String>) -> Result<()> {
    let countries = if countries.is_empty() {
        load_countries(&countries_file)?
    } else {
        countries
    };
    if countries.is_empty() {
        bail!("no countries to process");
    }

    let store = open_store().await?;
    let wiki = WikiClient::from_env()?;
    let summary = Ingestor::new(wiki, store).run(&countries).await;
    println!(
        "processed {} countries: {} found, {} inserted, {} batches already present, {} failed",
        summary.countries,
        summary.found,
        summary.inserted,
        summary.already_present,
        summary.failed
    );
    Ok(())
}
