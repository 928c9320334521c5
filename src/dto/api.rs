//! Wire types exchanged with the tool tracker JSON API.

use serde::{Deserialize, Serialize};

use crate::domain::tool::Tool;
use crate::domain::types::BrandName;
use crate::pagination::Page;

/// Query parameters accepted by `GET /api/tools`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolsQuery {
    /// Free-form search string; omitted from the URL when blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Brand filter; omitted when every brand is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandName>,
    pub page: usize,
    pub per_page: usize,
}

impl ToolsQuery {
    pub fn new(per_page: usize) -> Self {
        Self {
            search: None,
            brand: None,
            page: 1,
            per_page,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into().trim().to_string();
        self.search = Some(search).filter(|s| !s.is_empty());
        self
    }

    pub fn brand(mut self, brand: Option<BrandName>) -> Self {
        self.brand = brand;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }
}

/// Pagination block of the `GET /api/tools` response.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: usize,
    pub per_page: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Response payload of `GET /api/tools`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<Tool>,
    pub pagination: PaginationMeta,
}

impl From<ToolsResponse> for Page<Tool> {
    fn from(response: ToolsResponse) -> Self {
        let meta = response.pagination;
        Page::new(
            response.tools,
            meta.page,
            meta.per_page,
            meta.total_count,
            meta.has_next,
        )
    }
}
