use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::clients::notion_client::NotionClient;
use crate::config::PropertyNames;
use crate::error::SyncError;
use crate::models::query::DatabaseQuery;
use crate::models::task::TaskRecord;

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn query_tasks(&self, query: &DatabaseQuery) -> Result<Vec<TaskRecord>, SyncError>;
    async fn mark_synced(&self, task_id: &str) -> Result<(), SyncError>;
}

pub struct NotionTaskStore {
    client: NotionClient,
    properties: PropertyNames,
}

impl NotionTaskStore {
    pub fn new(client: NotionClient, properties: PropertyNames) -> Self {
        Self { client, properties }
    }
}

#[async_trait]
impl TaskStore for NotionTaskStore {
    async fn query_tasks(&self, query: &DatabaseQuery) -> Result<Vec<TaskRecord>, SyncError> {
        let pages = self.client.query_database(query).await?;
        Ok(pages
            .iter()
            .map(|page| TaskRecord::from_page(page, &self.properties))
            .collect())
    }

    async fn mark_synced(&self, task_id: &str) -> Result<(), SyncError> {
        let mut properties = Map::new();
        properties.insert(self.properties.synced.clone(), json!({ "checkbox": true }));
        self.client
            .update_page_properties(task_id, &Value::Object(properties))
            .await
    }
}
