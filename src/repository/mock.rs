//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::person::NewPerson;
use crate::domain::tool::{NewTool, Tool};
use crate::domain::types::{BrandName, ToolId};
use crate::dto::api::ToolsQuery;
use crate::forms::lend::LendForm;
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;
use crate::repository::{PersonWriter, ToolReader, ToolWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl ToolReader for Repository {
        async fn list_tools(&self, query: &ToolsQuery) -> RepositoryResult<Page<Tool>>;
        async fn list_brands(&self) -> RepositoryResult<Vec<BrandName>>;
    }

    #[async_trait]
    impl ToolWriter for Repository {
        async fn create_tool(&self, new_tool: &NewTool) -> RepositoryResult<Tool>;
        async fn lend_tool(&self, tool_id: ToolId, form: &LendForm) -> RepositoryResult<()>;
        async fn return_tool(&self, tool_id: ToolId) -> RepositoryResult<()>;
        async fn delete_tool(&self, tool_id: ToolId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl PersonWriter for Repository {
        async fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<()>;
    }
}
