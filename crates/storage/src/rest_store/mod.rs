//! PostgREST table store spoken over HTTP.
//!
//! Speaks the same dialect as the hosted Supabase client: filters as
//! `column=op.value` query parameters, `Prefer` headers for counts and
//! returned representations, JSON error bodies carrying a SQLSTATE `code`.


use async_trait::async_trait;
use fauna_core::{
    ANIMALS_TABLE, AnimalPage, AnimalRecord, AnimalUpdate, NewAnimal, PageWindow, StoreSettings,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{AnimalStore, StorageError};

const PREFER_COUNT: &str = "count=exact";
const PREFER_RETURN: &str = "return=representation";
/// Asks for one JSON object; zero matching rows is then a 406 error body.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client bound to the `animals` table of one PostgREST endpoint.
pub struct RestStore {
    client: reqwest::Client,
    table_url: Url,
    key: String,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("table_url", &self.table_url.as_str())
            .field("key", &"***")
            .finish()
    }
}

impl RestStore {
    /// Builds a client for `{url}/rest/v1/animals`.
    ///
    /// # Errors
    /// Returns `InvalidUrl` for a malformed base URL and `Transport` if the
    /// HTTP client cannot be built.
    pub fn new(settings: &StoreSettings) -> Result<Self, StorageError> {
        let base = settings.url.trim_end_matches('/');
        let raw = format!("{base}/rest/v1/{ANIMALS_TABLE}");
        let table_url = Url::parse(&raw)
            .map_err(|e| StorageError::InvalidUrl { url: raw.clone(), reason: e.to_string() })?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("fauna-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        tracing::info!(table = %table_url, "RestStore initialized");
        Ok(Self { client, table_url, key: settings.key.clone() })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.table_url.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// The single row matching `id`, with the changed representation when
    /// mutating. A miss surfaces PostgREST's own error.
    async fn row_by_id(
        &self,
        builder: RequestBuilder,
        id: i64,
        context: &str,
    ) -> Result<AnimalRecord, StorageError> {
        let response = builder
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        decode(check(response).await?, context).await
    }
}

#[async_trait]
impl AnimalStore for RestStore {
    async fn list_by_country(
        &self,
        country: &str,
        window: PageWindow,
    ) -> Result<AnimalPage, StorageError> {
        let response = self
            .request(Method::GET)
            .header("Prefer", PREFER_COUNT)
            .query(&[
                ("select", "*".to_owned()),
                ("country", format!("eq.{country}")),
                ("order", "id.asc".to_owned()),
                ("offset", window.offset.to_string()),
                ("limit", window.limit.to_string()),
            ])
            .send()
            .await?;
        // An offset past the last row is answered with 416 when counting.
        if response.status() == reqwest::StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(AnimalPage::default());
        }
        let response = check(response).await?;
        let exact = response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total);
        let animals: Vec<AnimalRecord> = decode(response, "country listing").await?;
        Ok(AnimalPage::best_effort(animals, exact))
    }

    async fn insert(&self, rows: &[NewAnimal]) -> Result<Vec<AnimalRecord>, StorageError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let response =
            self.request(Method::POST).header("Prefer", PREFER_RETURN).json(rows).send().await?;
        decode(check(response).await?, "insert").await
    }

    async fn get(&self, id: i64) -> Result<AnimalRecord, StorageError> {
        let builder = self.request(Method::GET).query(&[("select", "*")]);
        self.row_by_id(builder, id, "row lookup").await
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let response =
            self.request(Method::DELETE).query(&[("id", format!("eq.{id}"))]).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn update(&self, id: i64, changes: &AnimalUpdate) -> Result<AnimalRecord, StorageError> {
        if changes.is_empty() {
            return self.get(id).await;
        }
        let builder = self.request(Method::PATCH).header("Prefer", PREFER_RETURN).json(changes);
        self.row_by_id(builder, id, "update").await
    }
}

/// Passes successful responses through; turns error bodies into `StorageError`.
async fn check(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(err) => (err.code, err.message.unwrap_or(body)),
        Err(_) => (None, body),
    };
    let message = if message.is_empty() { status.to_string() } else { message };
    Err(StorageError::rejected(status.as_u16(), code, message))
}

async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, StorageError> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|source| StorageError::Decode { context: context.to_owned(), source })
}

/// Total from a `Content-Range` header such as `0-19/57`; `*` means unknown.
pub(crate) fn content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/').and_then(|(_, total)| total.trim().parse().ok())
}
