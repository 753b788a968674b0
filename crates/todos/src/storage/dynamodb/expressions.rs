//! DynamoDB update expression builders.
//!
//! Pure functions producing the expression, attribute names and attribute
//! values of the partial updates issued by the repository.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use todos_core::todo::{non_blank, TodoUpdate};

use super::conversions::{ATTR_ATTACHMENT_URL, ATTR_DONE, ATTR_DUE_DATE, ATTR_NAME};

/// A complete `UpdateItem` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Build the expression overwriting the mutable fields of a todo.
///
/// `name` is a DynamoDB reserved word, so every attribute goes through a
/// `#placeholder`. A missing or blank due date removes the attribute.
pub fn todo_update_expression(update: &TodoUpdate) -> UpdateExpression {
    let names = HashMap::from([
        ("#name".to_string(), ATTR_NAME.to_string()),
        ("#done".to_string(), ATTR_DONE.to_string()),
        ("#dueDate".to_string(), ATTR_DUE_DATE.to_string()),
    ]);
    let mut values = HashMap::from([
        (":name".to_string(), AttributeValue::S(update.name.clone())),
        (":done".to_string(), AttributeValue::Bool(update.done)),
    ]);

    let expression = match non_blank(update.due_date.clone()) {
        Some(due_date) => {
            values.insert(":dueDate".to_string(), AttributeValue::S(due_date));
            "SET #name = :name, #dueDate = :dueDate, #done = :done".to_string()
        }
        None => "SET #name = :name, #done = :done REMOVE #dueDate".to_string(),
    };

    UpdateExpression {
        expression,
        names,
        values,
    }
}

/// Build the expression recording the attachment location of a todo.
pub fn attachment_url_expression(url: &str) -> UpdateExpression {
    UpdateExpression {
        expression: "SET #attachmentUrl = :attachmentUrl".to_string(),
        names: HashMap::from([(
            "#attachmentUrl".to_string(),
            ATTR_ATTACHMENT_URL.to_string(),
        )]),
        values: HashMap::from([(
            ":attachmentUrl".to_string(),
            AttributeValue::S(url.to_string()),
        )]),
    }
}
