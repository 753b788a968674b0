//! AWS SDK client setup (Imperative Shell).

use super::error::{DynamodbError, Result};
use super::planning::{GsiState, GsiStatus, TableState, TableStatus};
use aws_sdk_dynamodb::types::{IndexStatus, KeySchemaElement, KeyType, TableDescription};
use aws_sdk_dynamodb::Client;

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for DynamoDB Local or LocalStack).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Result<Client> {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    tracing::debug!(region = %config.region, endpoint = ?config.endpoint_url, "created DynamoDB client");
    Ok(Client::new(&sdk_config))
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => match response.table() {
            Some(table) => Ok(Some(table_state(table))),
            None => Ok(None),
        },
        Err(err) => {
            let err = err.into_service_error();
            if err.is_resource_not_found_exception() {
                tracing::debug!(table = table_name, "table does not exist");
                Ok(None)
            } else {
                Err(DynamodbError::AwsSdk(err.to_string()))
            }
        }
    }
}

fn table_state(table: &TableDescription) -> TableState {
    let gsis = table
        .global_secondary_indexes()
        .iter()
        .map(|gsi| GsiState {
            name: gsi.index_name().unwrap_or_default().to_string(),
            status: match gsi.index_status() {
                Some(IndexStatus::Creating) => GsiStatus::Creating,
                Some(IndexStatus::Updating) => GsiStatus::Updating,
                Some(IndexStatus::Deleting) => GsiStatus::Deleting,
                _ => GsiStatus::Active,
            },
        })
        .collect();

    let status = match table.table_status() {
        Some(aws_sdk_dynamodb::types::TableStatus::Creating) => TableStatus::Creating,
        Some(aws_sdk_dynamodb::types::TableStatus::Updating) => TableStatus::Updating,
        Some(aws_sdk_dynamodb::types::TableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    TableState {
        status,
        partition_key: key_name(table.key_schema(), KeyType::Hash),
        sort_key: key_name(table.key_schema(), KeyType::Range),
        gsis,
    }
}

fn key_name(schema: &[KeySchemaElement], key_type: KeyType) -> Option<String> {
    schema
        .iter()
        .find(|element| *element.key_type() == key_type)
        .map(|element| element.attribute_name().to_string())
}
