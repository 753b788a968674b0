//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and todos.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use todos_core::storage::RepositoryError;
use todos_core::todo::{non_blank, TodoItem};

// ============================================================================
// Attribute names
// ============================================================================

pub const ATTR_USER_ID: &str = "userId";
pub const ATTR_TODO_ID: &str = "todoId";
pub const ATTR_CREATED_AT: &str = "createdAt";
pub const ATTR_NAME: &str = "name";
pub const ATTR_DUE_DATE: &str = "dueDate";
pub const ATTR_DONE: &str = "done";
pub const ATTR_ATTACHMENT_URL: &str = "attachmentUrl";

// ============================================================================
// Todo conversions
// ============================================================================

/// Build the primary key of a todo.
pub fn todo_key(user_id: &str, todo_id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            ATTR_USER_ID.to_string(),
            AttributeValue::S(user_id.to_string()),
        ),
        (
            ATTR_TODO_ID.to_string(),
            AttributeValue::S(todo_id.to_string()),
        ),
    ])
}

/// Convert a TodoItem to DynamoDB item.
///
/// Absent or blank optional fields are left out of the item rather than
/// stored as NULL or `""`.
pub fn todo_to_item(todo: &TodoItem) -> HashMap<String, AttributeValue> {
    let mut item = todo_key(&todo.user_id, &todo.todo_id);

    item.insert(
        ATTR_CREATED_AT.to_string(),
        AttributeValue::S(todo.created_at.clone()),
    );
    item.insert(ATTR_NAME.to_string(), AttributeValue::S(todo.name.clone()));
    item.insert(ATTR_DONE.to_string(), AttributeValue::Bool(todo.done));

    if let Some(due_date) = non_blank(todo.due_date.clone()) {
        item.insert(ATTR_DUE_DATE.to_string(), AttributeValue::S(due_date));
    }
    if let Some(url) = non_blank(todo.attachment_url.clone()) {
        item.insert(ATTR_ATTACHMENT_URL.to_string(), AttributeValue::S(url));
    }

    item
}

/// Convert a DynamoDB item to TodoItem.
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<TodoItem, RepositoryError> {
    Ok(TodoItem {
        user_id: get_string(item, ATTR_USER_ID)?,
        todo_id: get_string(item, ATTR_TODO_ID)?,
        created_at: get_string(item, ATTR_CREATED_AT)?,
        name: get_string(item, ATTR_NAME)?,
        due_date: get_optional_string(item, ATTR_DUE_DATE),
        done: get_bool(item, ATTR_DONE)?,
        attachment_url: get_optional_string(item, ATTR_ATTACHMENT_URL),
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
///
/// NULL and blank strings are read as absent.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    non_blank(item.get(key).and_then(|v| v.as_s().ok()).cloned())
}

/// Get a required boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}
