use async_trait::async_trait;

use crate::todo::{TodoItem, TodoUpdate};

use super::Result;

/// Repository for todo records, keyed by `(user_id, todo_id)`.
///
/// Writes are unconditional: none of them check whether the record exists,
/// so `update_todo` and `set_attachment_url` on a missing key create a partial
/// record holding only the key and the written attributes.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Gets the todos of a user, ordered by creation time.
    async fn get_todos_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>>;

    /// Stores a todo, replacing any record with the same key.
    async fn put_todo(&self, todo: &TodoItem) -> Result<()>;

    /// Overwrites the name, due date and done flag of a todo.
    async fn update_todo(
        &self,
        user_id: &str,
        todo_id: &str,
        update: &TodoUpdate,
    ) -> Result<()>;

    /// Sets the attachment URL of a todo.
    async fn set_attachment_url(&self, user_id: &str, todo_id: &str, url: &str) -> Result<()>;

    /// Deletes a todo. Deleting a missing key succeeds.
    async fn delete_todo(&self, user_id: &str, todo_id: &str) -> Result<()>;
}
