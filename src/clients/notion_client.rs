use serde::Serialize;
use serde_json::Value;

use super::{decode, endpoint, read_body};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::models::query::DatabaseQuery;
use crate::models::task::{Page, QueryResponse};

pub const NOTION_VERSION: &str = "2022-06-28";
const SERVICE: &str = "Notion";

#[derive(Debug, Serialize)]
struct PagePatch<'a> {
    properties: &'a Value,
}

#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(http: reqwest::Client, config: &SyncConfig) -> Self {
        Self {
            http,
            base_url: config.notion_api_base.clone(),
            token: config.notion_token.clone(),
            database_id: config.database_id.clone(),
        }
    }

    /// One page of query results; anything past `page_size` is not fetched.
    pub async fn query_database(&self, query: &DatabaseQuery) -> Result<Vec<Page>, SyncError> {
        let url = endpoint(
            &self.base_url,
            &["v1", "databases", &self.database_id, "query"],
        )?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(query)
            .send()
            .await?;
        let text = read_body(SERVICE, response).await?;
        let parsed: QueryResponse = decode("database query response", &text)?;
        Ok(parsed.results)
    }

    pub async fn update_page_properties(
        &self,
        page_id: &str,
        properties: &Value,
    ) -> Result<(), SyncError> {
        let url = endpoint(&self.base_url, &["v1", "pages", page_id])?;
        let response = self
            .http
            .patch(url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&PagePatch { properties })
            .send()
            .await?;
        read_body(SERVICE, response).await?;
        Ok(())
    }
}
