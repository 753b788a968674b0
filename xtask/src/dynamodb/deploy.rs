//! Table deployment operations (Imperative Shell).

use super::client;
use super::config::{AttributeType, GsiConfig, KeyAttribute, TableConfig};
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan, GsiStatus, TableStatus};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate, KeySchemaElement, KeyType, Projection, ProjectionType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use std::time::Duration;

const ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_DELAY: Duration = Duration::from_secs(2);

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
        }
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            for gsi in gsis_to_add {
                add_gsi(client, table_name, gsi).await?;
                wait_for_table_active(client, table_name).await?;
            }
        }
        DeployPlan::KeyMismatch {
            table_name,
            expected,
            found,
        } => {
            return Err(DynamodbError::KeyMismatch {
                table_name: table_name.clone(),
                expected: expected.clone(),
                found: found.clone(),
            });
        }
        DeployPlan::NoChanges { .. } => {}
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    if let DestroyPlan::DeleteTable { table_name } = plan {
        client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.into_service_error().to_string()))?;
        tracing::info!(table = %table_name, "deleted table");
    }
    Ok(())
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let mut keys = vec![&config.partition_key];
    keys.extend(config.sort_key.as_ref());
    for gsi in &config.gsis {
        keys.push(&gsi.partition_key);
        keys.extend(gsi.sort_key.as_ref());
    }

    let mut request = client
        .create_table()
        .table_name(&config.table_name)
        .set_key_schema(Some(key_schema(
            &config.partition_key,
            config.sort_key.as_ref(),
        )?))
        .set_attribute_definitions(Some(attribute_definitions(keys)?))
        .billing_mode(BillingMode::PayPerRequest);

    for gsi in &config.gsis {
        request = request.global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name(&gsi.name)
                .set_key_schema(Some(key_schema(&gsi.partition_key, gsi.sort_key.as_ref())?))
                .projection(all_projection())
                .build()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?,
        );
    }

    request
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.into_service_error().to_string()))?;
    tracing::info!(table = %config.table_name, "created table");
    Ok(())
}

async fn add_gsi(client: &Client, table_name: &str, gsi: &GsiConfig) -> Result<()> {
    let mut keys = vec![&gsi.partition_key];
    keys.extend(gsi.sort_key.as_ref());

    client
        .update_table()
        .table_name(table_name)
        .set_attribute_definitions(Some(attribute_definitions(keys)?))
        .global_secondary_index_updates(
            GlobalSecondaryIndexUpdate::builder()
                .create(
                    CreateGlobalSecondaryIndexAction::builder()
                        .index_name(&gsi.name)
                        .set_key_schema(Some(key_schema(&gsi.partition_key, gsi.sort_key.as_ref())?))
                        .projection(all_projection())
                        .build()
                        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?,
                )
                .build(),
        )
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.into_service_error().to_string()))?;

    tracing::info!(table = table_name, index = %gsi.name, "requested index creation");
    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    for attempt in 1..=ACTIVATION_ATTEMPTS {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            let gsis_active = state.gsis.iter().all(|g| g.status == GsiStatus::Active);
            if state.status == TableStatus::Active && gsis_active {
                return Ok(());
            }
        }
        tracing::debug!(table = table_name, attempt, "waiting for table to become active");
        tokio::time::sleep(ACTIVATION_DELAY).await;
    }

    Err(DynamodbError::TableActivationTimeout(table_name.to_string()))
}

fn key_schema(
    partition_key: &KeyAttribute,
    sort_key: Option<&KeyAttribute>,
) -> Result<Vec<KeySchemaElement>> {
    std::iter::once((partition_key, KeyType::Hash))
        .chain(sort_key.map(|sk| (sk, KeyType::Range)))
        .map(|(key, key_type)| {
            KeySchemaElement::builder()
                .attribute_name(&key.name)
                .key_type(key_type)
                .build()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))
        })
        .collect()
}

/// Attribute definitions for the given keys, one per distinct attribute name.
fn attribute_definitions<'a>(
    keys: impl IntoIterator<Item = &'a KeyAttribute>,
) -> Result<Vec<AttributeDefinition>> {
    let mut definitions: Vec<AttributeDefinition> = Vec::new();
    for key in keys {
        if definitions.iter().any(|d| d.attribute_name() == key.name) {
            continue;
        }
        definitions.push(
            AttributeDefinition::builder()
                .attribute_name(&key.name)
                .attribute_type(to_scalar_type(key.attribute_type))
                .build()
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?,
        );
    }
    Ok(definitions)
}

fn all_projection() -> Projection {
    Projection::builder()
        .projection_type(ProjectionType::All)
        .build()
}

fn to_scalar_type(attr_type: AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}
