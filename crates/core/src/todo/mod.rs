mod types;

pub use types::{non_blank, DeleteStatus, TodoItem, TodoUpdate};
