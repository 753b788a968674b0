//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use todos_core::storage::{RepositoryError, Result, TodoRepository};
use todos_core::todo::{non_blank, TodoItem, TodoUpdate};

/// Record key: `(user_id, todo_id)`.
type TodoKey = (String, String);

/// Attributes of a stored record.
///
/// Everything but the key is optional: an update or attachment write on a
/// missing key leaves a record holding only the written attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StoredTodo {
    created_at: Option<String>,
    name: Option<String>,
    due_date: Option<String>,
    done: Option<bool>,
    attachment_url: Option<String>,
}

impl StoredTodo {
    fn from_item(todo: &TodoItem) -> Self {
        Self {
            created_at: Some(todo.created_at.clone()),
            name: Some(todo.name.clone()),
            due_date: non_blank(todo.due_date.clone()),
            done: Some(todo.done),
            attachment_url: non_blank(todo.attachment_url.clone()),
        }
    }

    fn to_item(&self, (user_id, todo_id): &TodoKey) -> Result<TodoItem> {
        let missing = |field: &str| {
            RepositoryError::InvalidData(format!("Missing or invalid field: {}", field))
        };

        Ok(TodoItem {
            user_id: user_id.clone(),
            todo_id: todo_id.clone(),
            created_at: self.created_at.clone().ok_or_else(|| missing("createdAt"))?,
            name: self.name.clone().ok_or_else(|| missing("name"))?,
            due_date: self.due_date.clone(),
            done: self.done.ok_or_else(|| missing("done"))?,
            attachment_url: self.attachment_url.clone(),
        })
    }
}

/// In-memory todo repository for testing.
///
/// Uses a map wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<BTreeMap<TodoKey, StoredTodo>>>,
}

impl InMemoryTodoRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a record, complete or partial, exists for the key.
    pub async fn contains(&self, user_id: &str, todo_id: &str) -> bool {
        let todos = self.todos.read().await;
        todos.contains_key(&key(user_id, todo_id))
    }

    /// Number of stored records, including partial ones.
    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    /// Returns true if no record is stored.
    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

fn key(user_id: &str, todo_id: &str) -> TodoKey {
    (user_id.to_string(), todo_id.to_string())
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn get_todos_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let todos = self.todos.read().await;

        // The creation-time index is sparse: records without createdAt are not in it.
        let mut items = todos
            .iter()
            .filter(|((owner, _), stored)| owner == user_id && stored.created_at.is_some())
            .map(|(key, stored)| stored.to_item(key))
            .collect::<Result<Vec<_>>>()?;

        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }

    async fn put_todo(&self, todo: &TodoItem) -> Result<()> {
        let mut todos = self.todos.write().await;
        todos.insert(key(&todo.user_id, &todo.todo_id), StoredTodo::from_item(todo));
        Ok(())
    }

    async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        update: &TodoUpdate,
    ) -> Result<()> {
        let mut todos = self.todos.write().await;
        let stored = todos.entry(key(user_id, todo_id)).or_default();
        stored.name = Some(update.name.clone());
        stored.due_date = non_blank(update.due_date.clone());
        stored.done = Some(update.done);
        Ok(())
    }

    async fn set_attachment_url(&self, user_id: &str, todo_id: &str, url: &str) -> Result<()> {
        let mut todos = self.todos.write().await;
        let stored = todos.entry(key(user_id, todo_id)).or_default();
        stored.attachment_url = non_blank(Some(url.to_string()));
        Ok(())
    }

    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<()> {
        let mut todos = self.todos.write().await;
        todos.remove(&key(user_id, todo_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(user_id: &str, todo_id: &str, created_at: &str) -> TodoItem {
        TodoItem::new(user_id, format!("todo {todo_id}"))
            .with_id(todo_id)
            .with_created_at(created_at)
    }

    // ==================== Listing ====================

    #[tokio::test]
    async fn test_list_empty() {
        let repo = InMemoryTodoRepository::new();
        let todos = repo.get_todos_for_user("u1").await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_list_only_returns_the_users_todos() {
        let repo = InMemoryTodoRepository::new();
        repo.put_todo(&todo("u1", "t1", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repo.put_todo(&todo("u2", "t2", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repo.put_todo(&todo("u1", "t3", "2024-01-02T00:00:00Z"))
            .await
            .unwrap();

        let todos = repo.get_todos_for_user("u1").await.unwrap();

        assert_eq!(todos.len(), 2);
        assert!(todos.iter().all(|t| t.user_id == "u1"));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_creation_time() {
        let repo = InMemoryTodoRepository::new();
        // Inserted out of order, todo ids sort opposite to creation time.
        repo.put_todo(&todo("u1", "a", "2024-03-01T00:00:00Z"))
            .await
            .unwrap();
        repo.put_todo(&todo("u1", "b", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repo.put_todo(&todo("u1", "c", "2024-02-01T00:00:00Z"))
            .await
            .unwrap();

        let ids: Vec<String> = repo
            .get_todos_for_user("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.todo_id)
            .collect();

        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_list_skips_partial_records() {
        let repo = InMemoryTodoRepository::new();
        repo.update_todo("u1", "ghost", &TodoUpdate::new("orphan", false))
            .await
            .unwrap();

        let todos = repo.get_todos_for_user("u1").await.unwrap();

        assert!(todos.is_empty());
        assert!(repo.contains("u1", "ghost").await);
    }

    // ==================== Writes ====================

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let repo = InMemoryTodoRepository::new();
        let first = todo("u1", "t1", "2024-01-01T00:00:00Z");
        let second = TodoItem {
            name: "second".to_string(),
            done: true,
            ..first.clone()
        };

        repo.put_todo(&first).await.unwrap();
        repo.put_todo(&second).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.get_todos_for_user("u1").await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_attachment() {
        let repo = InMemoryTodoRepository::new();
        let original = todo("u1", "t1", "2024-01-01T00:00:00Z");
        repo.put_todo(&original).await.unwrap();
        repo.set_attachment_url("u1", "t1", "https://bucket/t1")
            .await
            .unwrap();

        let update = TodoUpdate::new("changed", true).with_due_date("2024-05-05");
        repo.update_todo("u1", "t1", &update).await.unwrap();

        let stored = repo.get_todos_for_user("u1").await.unwrap().remove(0);
        assert_eq!(stored.name, "changed");
        assert_eq!(stored.due_date.as_deref(), Some("2024-05-05"));
        assert!(stored.done);
        assert_eq!(stored.user_id, original.user_id);
        assert_eq!(stored.todo_id, original.todo_id);
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.attachment_url.as_deref(), Some("https://bucket/t1"));
    }

    #[tokio::test]
    async fn test_update_without_due_date_clears_it() {
        let repo = InMemoryTodoRepository::new();
        repo.put_todo(&todo("u1", "t1", "2024-01-01T00:00:00Z").with_due_date("2024-02-02"))
            .await
            .unwrap();

        repo.update_todo("u1", "t1", &TodoUpdate::new("no deadline", false))
            .await
            .unwrap();

        let stored = repo.get_todos_for_user("u1").await.unwrap().remove(0);
        assert_eq!(stored.due_date, None);
    }

    #[tokio::test]
    async fn test_blank_optionals_are_stored_as_absent() {
        let repo = InMemoryTodoRepository::new();
        let mut blank = todo("u1", "t1", "2024-01-01T00:00:00Z");
        blank.due_date = Some(String::new());
        blank.attachment_url = Some(" ".to_string());
        repo.put_todo(&blank).await.unwrap();

        let stored = repo.get_todos_for_user("u1").await.unwrap().remove(0);
        assert_eq!(stored.due_date, None);
        assert_eq!(stored.attachment_url, None);

        let mut update = TodoUpdate::new("blank date", false);
        update.due_date = Some(String::new());
        repo.update_todo("u1", "t1", &update).await.unwrap();

        let stored = repo.get_todos_for_user("u1").await.unwrap().remove(0);
        assert_eq!(stored.due_date, None);
    }

    #[tokio::test]
    async fn test_set_attachment_url_on_missing_key_creates_partial_record() {
        let repo = InMemoryTodoRepository::new();

        repo.set_attachment_url("u1", "t1", "https://bucket/t1")
            .await
            .unwrap();

        assert!(repo.contains("u1", "t1").await);
        assert!(repo.get_todos_for_user("u1").await.unwrap().is_empty());
    }

    // ==================== Deletes ====================

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryTodoRepository::new();
        repo.put_todo(&todo("u1", "t1", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        repo.delete_todo("u1", "t1").await.unwrap();

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_missing_key_succeeds() {
        let repo = InMemoryTodoRepository::new();
        repo.delete_todo("u1", "nope").await.unwrap();
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_only_touches_the_given_user() {
        let repo = InMemoryTodoRepository::new();
        repo.put_todo(&todo("u1", "t1", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repo.put_todo(&todo("u2", "t1", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();

        repo.delete_todo("u1", "t1").await.unwrap();

        assert!(!repo.contains("u1", "t1").await);
        assert!(repo.contains("u2", "t1").await);
    }
}
