//! The todos data-access facade.

use std::sync::Arc;

use thiserror::Error;

use todos_core::attachments::{attachment_url, AttachmentError, UploadUrlSigner};
use todos_core::storage::{RepositoryError, TodoRepository};
use todos_core::todo::{non_blank, DeleteStatus, TodoItem, TodoUpdate};

use crate::config::{ConfigError, TodoStoreConfig};

/// Errors surfaced by [`TodoStore`] operations.
///
/// Messages of the underlying errors are kept as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoStoreError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, TodoStoreError>;

/// Access layer over the todos table and the attachments bucket.
///
/// Holds no state besides its collaborators and configuration, so clones are
/// cheap and concurrent calls do not interact.
#[derive(Clone)]
pub struct TodoStore {
    todos: Arc<dyn TodoRepository>,
    attachments: Arc<dyn UploadUrlSigner>,
    config: TodoStoreConfig,
}

impl TodoStore {
    /// Creates a store over already constructed collaborators.
    pub fn new(
        todos: Arc<dyn TodoRepository>,
        attachments: Arc<dyn UploadUrlSigner>,
        config: TodoStoreConfig,
    ) -> Self {
        Self {
            todos,
            attachments,
            config,
        }
    }

    /// Creates a DynamoDB + S3 store from the environment.
    ///
    /// Reads [`TodoStoreConfig`] from the environment and builds both AWS
    /// clients from the default credential chain.
    #[cfg(feature = "aws")]
    pub async fn from_env() -> Result<Self> {
        use crate::attachments::S3UploadSigner;
        use crate::storage::DynamoDbTodoRepository;

        let config = TodoStoreConfig::from_env()?;
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let todos = DynamoDbTodoRepository::from_config(
            aws_sdk_dynamodb::Client::new(&sdk_config),
            &config,
        );
        let attachments =
            S3UploadSigner::from_config(aws_sdk_s3::Client::new(&sdk_config), &config);

        tracing::debug!(
            table = %config.table_name,
            index = %config.index_name,
            bucket = %config.bucket_name,
            "Created DynamoDB + S3 todo store"
        );

        Ok(Self::new(Arc::new(todos), Arc::new(attachments), config))
    }

    /// Get the store configuration.
    pub fn config(&self) -> &TodoStoreConfig {
        &self.config
    }

    /// Lists a user's todos in creation order.
    ///
    /// Only the first page of the underlying query is returned.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        tracing::info!(user_id, index = %self.config.index_name, "Listing todos");

        Ok(self.todos.get_todos_for_user(user_id).await?)
    }

    /// Stores `item`, replacing any todo with the same key, and returns it.
    ///
    /// Blank optional fields are stored, and returned, as absent.
    pub async fn create(&self, item: TodoItem) -> Result<TodoItem> {
        let item = TodoItem {
            due_date: non_blank(item.due_date),
            attachment_url: non_blank(item.attachment_url),
            ..item
        };
        tracing::info!(
            user_id = %item.user_id,
            todo_id = %item.todo_id,
            table = %self.config.table_name,
            "Creating todo"
        );

        self.todos.put_todo(&item).await?;
        Ok(item)
    }

    /// Overwrites name, due date and done flag of a todo.
    ///
    /// The record is not checked for existence: updating a missing key
    /// creates a record holding only the key and these three fields. Returns
    /// the update itself, not the merged record.
    pub async fn update(
        &self,
        user_id: &str,
        todo_id: &str,
        update: TodoUpdate,
    ) -> Result<TodoUpdate> {
        tracing::info!(
            user_id,
            todo_id,
            table = %self.config.table_name,
            "Updating todo"
        );

        self.todos.update_todo(user_id, todo_id, &update).await?;
        Ok(update)
    }

    /// Deletes a todo.
    ///
    /// Never fails: a repository error is logged and reported as
    /// [`DeleteStatus::Error`]. Deleting a missing key is a success.
    pub async fn delete(&self, user_id: &str, todo_id: &str) -> DeleteStatus {
        tracing::info!(
            user_id,
            todo_id,
            table = %self.config.table_name,
            "Deleting todo"
        );

        match self.todos.delete_todo(user_id, todo_id).await {
            Ok(()) => DeleteStatus::Success,
            Err(error) => {
                tracing::error!(user_id, todo_id, %error, "Failed to delete todo");
                DeleteStatus::Error
            }
        }
    }

    /// Issues a pre-signed upload URL for a todo's attachment.
    ///
    /// The object key is `todo_id`. The URL without its signature is stored
    /// as the todo's `attachment_url`, unconditionally, before the signed URL
    /// is returned.
    pub async fn get_upload_url(&self, todo_id: &str, user_id: &str) -> Result<String> {
        tracing::info!(
            user_id,
            todo_id,
            bucket = %self.config.bucket_name,
            "Issuing attachment upload URL"
        );

        let upload_url = self
            .attachments
            .presign_upload(todo_id, self.config.url_expiration())
            .await?;

        self.todos
            .set_attachment_url(user_id, todo_id, attachment_url(&upload_url))
            .await?;

        Ok(upload_url)
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::attachments::InMemoryUploadSigner;
    use crate::storage::InMemoryTodoRepository;

    fn test_config() -> TodoStoreConfig {
        TodoStoreConfig {
            table_name: "Todos-test".to_string(),
            index_name: "CreatedAtIndex".to_string(),
            bucket_name: "todos-attachments-test".to_string(),
            url_expiration_seconds: 300,
        }
    }

    fn test_store() -> (TodoStore, InMemoryTodoRepository) {
        let repo = InMemoryTodoRepository::new();
        let store = TodoStore::new(
            Arc::new(repo.clone()),
            Arc::new(InMemoryUploadSigner::new("todos-attachments-test")),
            test_config(),
        );
        (store, repo)
    }

    fn buy_milk() -> TodoItem {
        TodoItem::new("u1", "buy milk")
            .with_id("t1")
            .with_created_at("2024-01-01T10:00:00Z")
    }

    /// Repository whose every call fails.
    struct FailingRepository;

    #[async_trait]
    impl TodoRepository for FailingRepository {
        async fn get_todos_for_user(&self, _: &str) -> todos_core::storage::Result<Vec<TodoItem>> {
            Err(RepositoryError::QueryFailed("table is gone".to_string()))
        }

        async fn put_todo(&self, _: &TodoItem) -> todos_core::storage::Result<()> {
            Err(RepositoryError::WriteFailed("table is gone".to_string()))
        }

        async fn update_todo(
            &self,
            _: &str,
            _: &str,
            _: &TodoUpdate,
        ) -> todos_core::storage::Result<()> {
            Err(RepositoryError::WriteFailed("table is gone".to_string()))
        }

        async fn set_attachment_url(
            &self,
            _: &str,
            _: &str,
            _: &str,
        ) -> todos_core::storage::Result<()> {
            Err(RepositoryError::WriteFailed("table is gone".to_string()))
        }

        async fn delete_todo(&self, _: &str, _: &str) -> todos_core::storage::Result<()> {
            Err(RepositoryError::ConnectionFailed("connection reset".to_string()))
        }
    }

    /// Signer that refuses to sign.
    struct FailingSigner;

    #[async_trait]
    impl UploadUrlSigner for FailingSigner {
        async fn presign_upload(
            &self,
            _: &str,
            _: Duration,
        ) -> std::result::Result<String, AttachmentError> {
            Err(AttachmentError::Presign("no credentials".to_string()))
        }
    }

    fn failing_store() -> TodoStore {
        TodoStore::new(
            Arc::new(FailingRepository),
            Arc::new(InMemoryUploadSigner::new("todos-attachments-test")),
            test_config(),
        )
    }

    // ==================== list / create ====================

    #[tokio::test]
    async fn test_create_then_list_returns_exactly_the_item() {
        let (store, _) = test_store();

        let created = store.create(buy_milk()).await.unwrap();
        let todos = store.list_by_user("u1").await.unwrap();

        assert_eq!(created, buy_milk());
        assert_eq!(todos, vec![buy_milk()]);
    }

    #[tokio::test]
    async fn test_create_with_blank_due_date_lists_equal_item() {
        let (store, _) = test_store();
        let mut item = buy_milk();
        item.due_date = Some(String::new());

        let created = store.create(item).await.unwrap();
        let todos = store.list_by_user("u1").await.unwrap();

        assert_eq!(created.due_date, None);
        assert_eq!(todos, vec![created]);
    }

    #[tokio::test]
    async fn test_list_only_returns_the_callers_todos() {
        let (store, _) = test_store();
        store.create(buy_milk()).await.unwrap();
        store
            .create(TodoItem::new("u2", "walk dog").with_id("t2"))
            .await
            .unwrap();

        let todos = store.list_by_user("u2").await.unwrap();

        assert_eq!(todos.len(), 1);
        assert!(todos.iter().all(|t| t.user_id == "u2"));
    }

    #[tokio::test]
    async fn test_create_overwrites_same_key() {
        let (store, repo) = test_store();
        store.create(buy_milk()).await.unwrap();

        let replacement = TodoItem {
            name: "buy oat milk".to_string(),
            done: true,
            ..buy_milk()
        };
        store.create(replacement.clone()).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(store.list_by_user("u1").await.unwrap(), vec![replacement]);
    }

    #[tokio::test]
    async fn test_list_error_propagates() {
        let store = failing_store();

        let result = store.list_by_user("u1").await;

        assert_eq!(
            result,
            Err(TodoStoreError::Repository(RepositoryError::QueryFailed(
                "table is gone".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_create_error_propagates() {
        let store = failing_store();
        assert!(store.create(buy_milk()).await.is_err());
    }

    // ==================== update ====================

    #[tokio::test]
    async fn test_update_changes_only_mutable_fields() {
        let (store, _) = test_store();
        store.create(buy_milk()).await.unwrap();
        let upload_url = store.get_upload_url("t1", "u1").await.unwrap();

        let update = TodoUpdate::new("buy bread", true).with_due_date("2024-01-01");
        let returned = store.update("u1", "t1", update.clone()).await.unwrap();

        assert_eq!(returned, update);

        let todo = store.list_by_user("u1").await.unwrap().remove(0);
        assert_eq!(todo.name, "buy bread");
        assert_eq!(todo.due_date.as_deref(), Some("2024-01-01"));
        assert!(todo.done);
        assert_eq!(todo.user_id, "u1");
        assert_eq!(todo.todo_id, "t1");
        assert_eq!(todo.created_at, "2024-01-01T10:00:00Z");
        assert_eq!(
            todo.attachment_url.as_deref(),
            Some(attachment_url(&upload_url))
        );
    }

    #[tokio::test]
    async fn test_update_missing_key_creates_partial_record() {
        let (store, repo) = test_store();

        let update = TodoUpdate::new("orphan", false);
        store.update("u1", "ghost", update).await.unwrap();

        assert!(repo.contains("u1", "ghost").await);
        // Without createdAt it stays out of the creation-time index.
        assert!(store.list_by_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_error_keeps_message() {
        let store = failing_store();

        let err = store
            .update("u1", "t1", TodoUpdate::new("x", false))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Write failed: table is gone");
    }

    // ==================== delete ====================

    #[tokio::test]
    async fn test_delete_existing_then_again() {
        let (store, _) = test_store();
        store.create(buy_milk()).await.unwrap();

        let first = store.delete("u1", "t1").await;
        let second = store.delete("u1", "t1").await;

        assert_eq!(first.to_string(), "success");
        assert_eq!(second.to_string(), "success");
        assert!(store.list_by_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_success() {
        let (store, _) = test_store();
        assert_eq!(store.delete("u1", "never").await, DeleteStatus::Success);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported_not_raised() {
        let store = failing_store();

        let status = store.delete("u1", "t1").await;

        assert_eq!(status, DeleteStatus::Error);
        assert_eq!(status.to_string(), "Error");
    }

    // ==================== upload URL ====================

    #[tokio::test]
    async fn test_upload_url_targets_todo_and_records_location() {
        let (store, _) = test_store();
        store.create(buy_milk()).await.unwrap();

        let url = store.get_upload_url("t1", "u1").await.unwrap();

        assert!(url.contains("/todos-attachments-test/t1?"));
        assert!(url.contains("X-Amz-Expires=300"));

        let todo = store.list_by_user("u1").await.unwrap().remove(0);
        assert_eq!(
            todo.attachment_url.as_deref(),
            Some("http://localhost:4566/todos-attachments-test/t1")
        );
        assert_eq!(todo.name, "buy milk");
    }

    #[tokio::test]
    async fn test_upload_url_on_missing_key_still_writes() {
        let (store, repo) = test_store();

        let url = store.get_upload_url("t9", "u1").await.unwrap();

        assert!(url.contains("/t9?"));
        assert!(repo.contains("u1", "t9").await);
    }

    #[tokio::test]
    async fn test_upload_url_signer_error_propagates_without_write() {
        let repo = InMemoryTodoRepository::new();
        let store = TodoStore::new(
            Arc::new(repo.clone()),
            Arc::new(FailingSigner),
            test_config(),
        );

        let result = store.get_upload_url("t1", "u1").await;

        assert_eq!(
            result,
            Err(TodoStoreError::Attachment(AttachmentError::Presign(
                "no credentials".to_string()
            )))
        );
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_upload_url_store_error_propagates() {
        let store = failing_store();

        let result = store.get_upload_url("t1", "u1").await;

        assert!(matches!(
            result,
            Err(TodoStoreError::Repository(RepositoryError::WriteFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_operations_are_independent() {
        let (store, _) = test_store();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let todo = TodoItem::new("u1", format!("todo {i}"))
                        .with_id(format!("t{i}"))
                        .with_created_at(format!("2024-01-01T10:00:{i:02}Z"));
                    store.create(todo).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let todos = store.list_by_user("u1").await.unwrap();
        assert_eq!(todos.len(), 16);
        assert_eq!(todos.first().unwrap().todo_id, "t0");
        assert_eq!(todos.last().unwrap().todo_id, "t15");
    }
}
