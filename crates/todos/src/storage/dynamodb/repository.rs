//! DynamoDB repository implementation.
//!
//! Implements `TodoRepository` from `todos_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use todos_core::storage::{Result, TodoRepository};
use todos_core::todo::{TodoItem, TodoUpdate};

use super::conversions::{item_to_todo, todo_key, todo_to_item, ATTR_USER_ID};
use super::error::{
    map_delete_item_error, map_put_item_error, map_query_error, map_update_item_error,
};
use super::expressions::{attachment_url_expression, todo_update_expression, UpdateExpression};
use crate::config::TodoStoreConfig;

/// DynamoDB-based todo repository.
///
/// Every method issues exactly one request. Writes carry no condition
/// expression, so they never fail because a record is missing or present.
#[derive(Debug, Clone)]
pub struct DynamoDbTodoRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoDbTodoRepository {
    /// Creates a new repository with the given DynamoDB client, table and index.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }

    /// Creates a new repository using the table and index named in `config`.
    pub fn from_config(client: Client, config: &TodoStoreConfig) -> Self {
        Self::new(client, &config.table_name, &config.index_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get the creation-time index name.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn apply_update(
        &self,
        user_id: &str,
        todo_id: &str,
        update: UpdateExpression,
    ) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(user_id, todo_id)))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(())
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    async fn get_todos_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression(format!("{ATTR_USER_ID} = :userId"))
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;

        // Only the first page is read.
        if result.last_evaluated_key.is_some() {
            tracing::warn!(
                user_id,
                table = %self.table_name,
                index = %self.index_name,
                "Query result was truncated, returning the first page only"
            );
        }

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_todo).collect()
    }

    async fn put_todo(&self, todo: &TodoItem) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(todo)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        update: &TodoUpdate,
    ) -> Result<()> {
        self.apply_update(user_id, todo_id, todo_update_expression(update))
            .await
    }

    async fn set_attachment_url(&self, user_id: &str, todo_id: &str, url: &str) -> Result<()> {
        self.apply_update(user_id, todo_id, attachment_url_expression(url))
            .await
    }

    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(user_id, todo_id)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
