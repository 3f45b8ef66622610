use serde::{Deserialize, Deserializer, Serialize};

use crate::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// One catalog row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub country: String,
    #[serde(default)]
    pub wikipedia_title: Option<String>,
}

/// Insert payload.
///
/// Every column is nullable here: required columns are enforced by the store,
/// and its rejection is relayed to the caller untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnimal {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub country: Option<String>,
    pub wikipedia_title: Option<String>,
}

impl NewAnimal {
    /// Row submitted through the API. The page title defaults to the name.
    #[must_use]
    pub fn submitted(
        name: Option<String>,
        description: Option<String>,
        image_url: Option<String>,
        country: Option<String>,
    ) -> Self {
        let wikipedia_title = name.clone();
        Self { name, description, image_url, country, wikipedia_title }
    }

    /// Row harvested from an encyclopedia page.
    #[must_use]
    pub fn from_page(
        country: &str,
        title: &str,
        description: String,
        image_url: Option<String>,
    ) -> Self {
        Self {
            name: Some(title.to_owned()),
            description: Some(description),
            image_url,
            country: Some(country.to_owned()),
            wikipedia_title: Some(title.to_owned()),
        }
    }
}

/// Mutable subset of a row.
///
/// The outer `Option` records whether the key was sent at all: `None` leaves
/// the column as it is, `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalUpdate {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
}

impl AnimalUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image_url.is_none()
    }

    /// Columns named in this update with the value to write, in table order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(&'static str, Option<&str>)> {
        [("name", &self.name), ("description", &self.description), ("image_url", &self.image_url)]
            .into_iter()
            .filter_map(|(column, value)| value.as_ref().map(|v| (column, v.as_deref())))
            .collect()
    }
}

/// A key that is present deserializes to `Some`, even when its value is null.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// One page of a country listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalPage {
    pub animals: Vec<AnimalRecord>,
    pub total: u64,
}

impl AnimalPage {
    /// Builds a page whose `total` is only trusted when rows came back.
    ///
    /// An empty page always reports `0`, even when `offset` merely ran past
    /// the end of a non-empty country.
    #[must_use]
    pub fn best_effort(animals: Vec<AnimalRecord>, exact_count: Option<u64>) -> Self {
        let total = if animals.is_empty() {
            0
        } else {
            exact_count.unwrap_or(animals.len() as u64)
        };
        Self { animals, total }
    }
}

/// Offset/limit window of a listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self { offset: 0, limit: DEFAULT_PAGE_LIMIT }
    }
}

impl PageWindow {
    /// Parses raw query values leniently: anything unparseable, a zero or
    /// negative limit, or a negative offset falls back to the default.
    #[must_use]
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = limit
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .and_then(|v| usize::try_from(v).ok())
            .map_or(DEFAULT_PAGE_LIMIT, |v| v.min(MAX_PAGE_LIMIT));
        let offset = offset
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(0);
        Self { offset, limit }
    }
}
