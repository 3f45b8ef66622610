use fauna_core::{CATEGORY_PAGE_SIZE, DEFAULT_CATEGORY_PREFIX, DEFAULT_WIKI_URL, env_optional};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::error::WikiError;
use crate::types::{CategoryPage, CategoryResponse, PageSummary};

/// Environment override for the encyclopedia host.
pub const WIKI_URL_VAR: &str = "FAUNA_WIKI_URL";
/// Environment override for the category prefix.
pub const CATEGORY_PREFIX_VAR: &str = "FAUNA_WIKI_CATEGORY_PREFIX";

/// Client for the category listing and page summary endpoints.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: reqwest::Client,
    base_url: Url,
    category_prefix: String,
}

impl WikiClient {
    /// Creates a client against `base_url` (e.g. `https://es.wikipedia.org`).
    ///
    /// # Errors
    /// Returns an error if the URL cannot be a base or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, category_prefix: impl Into<String>) -> Result<Self, WikiError> {
        let invalid = |reason: String| WikiError::InvalidUrl { url: base_url.to_owned(), reason };
        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("cannot be a base".to_owned()));
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                "fauna-catalog/",
                env!("CARGO_PKG_VERSION"),
                " (https://github.com/Stranmor/fauna-catalog)"
            ))
            .build()?;
        Ok(Self { client, base_url, category_prefix: category_prefix.into() })
    }

    /// Client configured from `FAUNA_WIKI_URL` / `FAUNA_WIKI_CATEGORY_PREFIX`,
    /// falling back to Spanish Wikipedia's endemic-fauna categories.
    ///
    /// # Errors
    /// See [`WikiClient::new`].
    pub fn from_env() -> Result<Self, WikiError> {
        let base = env_optional(WIKI_URL_VAR).unwrap_or_else(|| DEFAULT_WIKI_URL.to_owned());
        let prefix = env_optional(CATEGORY_PREFIX_VAR)
            .unwrap_or_else(|| DEFAULT_CATEGORY_PREFIX.to_owned());
        Self::new(&base, prefix)
    }

    /// Category holding the endemic fauna of `country`.
    #[must_use]
    pub fn category_title(&self, country: &str) -> String {
        format!("{}{}", self.category_prefix, country.replace(' ', "_"))
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetches one page of `category`, resuming at `cursor` when given.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn category_members(
        &self,
        category: &str,
        cursor: Option<&str>,
    ) -> Result<CategoryPage, WikiError> {
        let page_size = CATEGORY_PAGE_SIZE.to_string();
        let mut request = self.client.get(self.endpoint(["w", "api.php"])).query(&[
            ("action", "query"),
            ("list", "categorymembers"),
            ("cmtitle", category),
            ("cmlimit", page_size.as_str()),
            ("format", "json"),
            ("origin", "*"),
        ]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cmcontinue", cursor)]);
        }
        let response = check(request.send().await?).await?;
        let raw: CategoryResponse = decode(response, "category listing").await?;
        Ok(raw.into())
    }

    /// Fetches the REST summary of the page titled `title`.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn page_summary(&self, title: &str) -> Result<PageSummary, WikiError> {
        let url = self.endpoint(["api", "rest_v1", "page", "summary", title]);
        let response = check(self.client.get(url).send().await?).await?;
        decode(response, "page summary").await
    }
}

async fn check(response: Response) -> Result<Response, WikiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
    Err(WikiError::HttpStatus { code: status.as_u16(), body })
}

async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, WikiError> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|source| WikiError::JsonParse { context: context.to_owned(), source })
}
