//! Request/query types (Deserialize)

use fauna_core::PageWindow;
use serde::Deserialize;

/// Raw `limit`/`offset` values, kept as text so that garbage falls back to
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuery {
    pub fn window(&self) -> PageWindow {
        PageWindow::from_raw(self.limit.as_deref(), self.offset.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAnimalRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub country: Option<String>,
}
