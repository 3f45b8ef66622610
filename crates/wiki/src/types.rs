use serde::Deserialize;

/// One entry of a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryMember {
    pub title: String,
    #[serde(default)]
    pub pageid: Option<i64>,
    #[serde(default)]
    pub ns: Option<i64>,
}

/// One page of a category listing plus the cursor for the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPage {
    pub members: Vec<CategoryMember>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryResponse {
    #[serde(default)]
    pub query: Option<CategoryQuery>,
    #[serde(default, rename = "continue")]
    pub continuation: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryQuery {
    #[serde(default)]
    pub categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Continuation {
    #[serde(default)]
    pub cmcontinue: Option<String>,
}

impl From<CategoryResponse> for CategoryPage {
    fn from(resp: CategoryResponse) -> Self {
        Self {
            members: resp.query.map(|q| q.categorymembers).unwrap_or_default(),
            next_cursor: resp
                .continuation
                .and_then(|c| c.cmcontinue)
                .filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

/// The parts of a page summary the catalog keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl PageSummary {
    /// Plain-text extract, empty when the page has none.
    #[must_use]
    pub fn description(&self) -> String {
        self.extract.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        self.thumbnail.as_ref().map(|t| t.source.clone())
    }
}
