//! Table configuration types (Functional Core - pure data).

/// Default table name, matching the `TODOS_TABLE` the store reads.
pub const DEFAULT_TABLE_NAME: &str = "Todos";
/// Default creation-time index name, matching `TODOS_CREATED_AT_INDEX`.
pub const DEFAULT_INDEX_NAME: &str = "CreatedAtIndex";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub gsis: Vec<GsiConfig>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    /// A string-typed key attribute.
    pub fn string(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attribute_type: AttributeType::String,
        }
    }
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Global Secondary Index configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub projection: ProjectionType,
}

/// GSI projection type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionType {
    All,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Renames the creation-time index.
    pub fn with_index_name(mut self, name: &str) -> Self {
        for gsi in &mut self.gsis {
            gsi.name = name.to_string();
        }
        self
    }
}

/// Returns the canonical table configuration for todos.
///
/// Records are keyed by `userId` / `todoId`; the index lists a user's todos
/// ordered by `createdAt`. This is a pure function - no I/O.
pub fn todos_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: KeyAttribute::string("userId"),
        sort_key: Some(KeyAttribute::string("todoId")),
        gsis: vec![GsiConfig {
            name: DEFAULT_INDEX_NAME.to_string(),
            partition_key: KeyAttribute::string("userId"),
            sort_key: Some(KeyAttribute::string("createdAt")),
            projection: ProjectionType::All,
        }],
        billing_mode: BillingMode::PayPerRequest,
    }
}
