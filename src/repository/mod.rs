//! Access to the tool tracker backend.
//!
//! The backend is an ordinary REST service; these traits are the seam between
//! it and the services / list synchronization runtime.

use async_trait::async_trait;

use crate::domain::person::NewPerson;
use crate::domain::tool::{NewTool, Tool};
use crate::domain::types::{BrandName, ToolId};
use crate::dto::api::ToolsQuery;
use crate::forms::lend::LendForm;
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

#[async_trait]
pub trait ToolReader {
    async fn list_tools(&self, query: &ToolsQuery) -> RepositoryResult<Page<Tool>>;
    async fn list_brands(&self) -> RepositoryResult<Vec<BrandName>>;
}

#[async_trait]
pub trait ToolWriter {
    async fn create_tool(&self, new_tool: &NewTool) -> RepositoryResult<Tool>;
    async fn lend_tool(&self, tool_id: ToolId, form: &LendForm) -> RepositoryResult<()>;
    async fn return_tool(&self, tool_id: ToolId) -> RepositoryResult<()>;
    async fn delete_tool(&self, tool_id: ToolId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait PersonWriter {
    async fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<()>;
}
