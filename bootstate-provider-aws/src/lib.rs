//! Bootstate AWS Provider
//!
//! Implements the bootstate capability traits on top of the AWS SDK:
//! [`S3BucketApi`] for the state bucket and [`DynamoDbLockTableApi`] for the
//! lock table. Credentials resolve through the SDK's default provider chain.

pub mod dynamodb;
mod error;
pub mod s3;

pub use dynamodb::DynamoDbLockTableApi;
pub use s3::S3BucketApi;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load the shared SDK configuration for a region and optional named profile
pub async fn load_config(region: &str, profile: Option<&str>) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// Both AWS clients for one region
pub struct AwsProvider {
    pub s3: S3BucketApi,
    pub dynamodb: DynamoDbLockTableApi,
}

impl AwsProvider {
    /// Create clients for the specified region
    pub async fn new(region: &str, profile: Option<&str>) -> Self {
        let config = load_config(region, profile).await;
        Self::from_config(&config)
    }

    pub fn from_config(config: &SdkConfig) -> Self {
        Self {
            s3: S3BucketApi::new(config),
            dynamodb: DynamoDbLockTableApi::new(config),
        }
    }
}
