//! DynamoDB implementation of the lock table capability

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode as SdkBillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType, TableStatus as SdkTableStatus,
};
use bootstate_core::api::{ApiError, ApiResult, LockTableApi, TableStatus};
use bootstate_core::resource::{BillingMode, KeyAttributeType, LockTableSpec};
use log::debug;

use crate::error::{build_error, sdk_error};

/// DynamoDB-backed lock table operations
pub struct DynamoDbLockTableApi {
    client: Client,
}

impl DynamoDbLockTableApi {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LockTableApi for DynamoDbLockTableApi {
    async fn describe_table(&self, name: &str) -> ApiResult<TableStatus> {
        let result = self.client.describe_table().table_name(name).send().await;

        match result {
            Ok(output) => Ok(output
                .table()
                .and_then(|t| t.table_status())
                .map(table_status)
                .unwrap_or_else(|| TableStatus::Other("UNKNOWN".to_string()))),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception())
                {
                    Err(ApiError::NotFound)
                } else {
                    Err(sdk_error(err))
                }
            }
        }
    }

    async fn create_table(&self, table: &LockTableSpec) -> ApiResult<()> {
        let key = KeySchemaElement::builder()
            .attribute_name(table.partition_key())
            .key_type(KeyType::Hash)
            .build()
            .map_err(build_error)?;
        let attribute = AttributeDefinition::builder()
            .attribute_name(table.partition_key())
            .attribute_type(scalar_type(table.key_type()))
            .build()
            .map_err(build_error)?;

        debug!(
            "CreateTable {} (hash key {}, {:?})",
            table.name(),
            table.partition_key(),
            table.billing_mode()
        );
        self.client
            .create_table()
            .table_name(table.name())
            .key_schema(key)
            .attribute_definitions(attribute)
            .billing_mode(billing_mode(table.billing_mode()))
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }
}

fn table_status(status: &SdkTableStatus) -> TableStatus {
    match status {
        SdkTableStatus::Active => TableStatus::Active,
        SdkTableStatus::Creating => TableStatus::Creating,
        SdkTableStatus::Updating => TableStatus::Updating,
        SdkTableStatus::Deleting => TableStatus::Deleting,
        other => TableStatus::Other(other.as_str().to_string()),
    }
}

fn scalar_type(key_type: KeyAttributeType) -> ScalarAttributeType {
    match key_type {
        KeyAttributeType::String => ScalarAttributeType::S,
    }
}

fn billing_mode(mode: BillingMode) -> SdkBillingMode {
    match mode {
        BillingMode::PayPerRequest => SdkBillingMode::PayPerRequest,
    }
}
