use anyhow::Result;
use clap::{Parser, Subcommand};
use fauna_core::{DEFAULT_HTTP_PORT, StoreSettings};
use fauna_storage::{AnimalStore, RestStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fauna")]
#[command(about = "Catalog of endemic animals by country", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Seed the catalog from Wikipedia endemic-fauna categories
    Ingest {
        /// JSON file whose values are the country names to process
        #[arg(short = 'f', long, default_value = "translations.json")]
        countries_file: PathBuf,
        /// Process only these countries (repeatable); the file is not read
        #[arg(short, long = "country")]
        countries: Vec<String>,
    },
}

/// Direct Postgres access when built with `postgres` and `DATABASE_URL` is set.
#[cfg(feature = "postgres")]
async fn direct_store() -> Result<Option<Arc<dyn AnimalStore>>> {
    match fauna_core::env_optional("DATABASE_URL") {
        Some(url) => {
            let storage = fauna_storage::PgStorage::new(&url).await?;
            Ok(Some(Arc::new(storage)))
        },
        None => Ok(None),
    }
}

#[cfg(not(feature = "postgres"))]
async fn direct_store() -> Result<Option<Arc<dyn AnimalStore>>> {
    Ok(None)
}

pub(crate) async fn open_store() -> Result<Arc<dyn AnimalStore>> {
    if let Some(store) = direct_store().await? {
        tracing::info!("Using direct PostgreSQL store");
        return Ok(store);
    }
    let settings = StoreSettings::from_env()?;
    Ok(Arc::new(RestStore::new(&settings)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is the normal case in deployments.
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Ingest { countries_file, countries } => {
            commands::ingest::run(countries_file, countries).await?;
        },
    }

    Ok(())
}
