//! `reqwest` implementation of the repository traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::person::NewPerson;
use crate::domain::tool::{NewTool, Tool};
use crate::domain::types::{BrandName, ToolId};
use crate::dto::api::{ToolsQuery, ToolsResponse};
use crate::forms::lend::LendForm;
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{PersonWriter, ToolReader, ToolWriter};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Talks to the backend over HTTP. Cheap to clone.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
}

impl HttpRepository {
    /// `base_url` may carry a path prefix; endpoints are resolved below it.
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| RepositoryError::Validation(format!("Invalid base url: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RepositoryError::from)?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> RepositoryResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| RepositoryError::Validation(format!("Invalid path {path}: {e}")))
    }

    async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> RepositoryResult<()> {
        let body = serde_html_form::to_string(form)
            .map_err(|e| RepositoryError::Validation(format!("Form encoding error: {e}")))?;
        let response = self
            .client
            .post(self.url(path)?)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    async fn post_empty(&self, path: &str) -> RepositoryResult<()> {
        let response = self.client.post(self.url(path)?).send().await?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RepositoryError::Http {
            status: status.as_u16(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    let response = check_status(response)?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl ToolReader for HttpRepository {
    async fn list_tools(&self, query: &ToolsQuery) -> RepositoryResult<Page<Tool>> {
        log::debug!("Fetching tools: {query:?}");
        let response = self
            .client
            .get(self.url("api/tools")?)
            .query(query)
            .send()
            .await?;
        let payload: ToolsResponse = read_json(response).await?;
        Ok(payload.into())
    }

    async fn list_brands(&self) -> RepositoryResult<Vec<BrandName>> {
        let response = self.client.get(self.url("api/brands")?).send().await?;
        let names: Vec<Option<String>> = read_json(response).await?;
        Ok(names
            .into_iter()
            .flatten()
            .filter_map(|name| BrandName::new(name).ok())
            .collect())
    }
}

#[async_trait]
impl ToolWriter for HttpRepository {
    async fn create_tool(&self, new_tool: &NewTool) -> RepositoryResult<Tool> {
        let response = self
            .client
            .post(self.url("api/tools")?)
            .json(new_tool)
            .send()
            .await?;
        read_json(response).await
    }

    async fn lend_tool(&self, tool_id: ToolId, form: &LendForm) -> RepositoryResult<()> {
        self.post_form(&format!("lend/{tool_id}"), form).await
    }

    async fn return_tool(&self, tool_id: ToolId) -> RepositoryResult<()> {
        self.post_empty(&format!("return/{tool_id}")).await
    }

    async fn delete_tool(&self, tool_id: ToolId) -> RepositoryResult<()> {
        self.post_empty(&format!("delete/{tool_id}")).await
    }
}

#[async_trait]
impl PersonWriter for HttpRepository {
    async fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<()> {
        self.post_form("people", new_person).await
    }
}
