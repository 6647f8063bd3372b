//! S3 implementation of the bucket capability

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::types::{
    BucketLocationConstraint, BucketVersioningStatus, CreateBucketConfiguration,
    PublicAccessBlockConfiguration, ServerSideEncryption, ServerSideEncryptionByDefault,
    ServerSideEncryptionConfiguration, ServerSideEncryptionRule, VersioningConfiguration,
};
use bootstate_core::api::{ApiError, ApiResult, BucketApi};
use bootstate_core::resource::{PublicAccessBlock, SseAlgorithm, VersioningStatus};
use log::debug;

use crate::error::{build_error, sdk_error};

/// S3-backed bucket operations
pub struct S3BucketApi {
    client: Client,
}

impl S3BucketApi {
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
impl BucketApi for S3BucketApi {
    async fn head_bucket(&self, name: &str) -> ApiResult<()> {
        let result = self.client.head_bucket().bucket(name).send().await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                // HeadBucket has no body, so a missing bucket shows up either
                // as the modeled NotFound or only as a bare 404 status
                let modeled = err.as_service_error().is_some_and(|e| e.is_not_found());
                let status_404 = err
                    .raw_response()
                    .is_some_and(|r| r.status().as_u16() == 404);
                if modeled || status_404 {
                    Err(ApiError::NotFound)
                } else {
                    Err(sdk_error(err))
                }
            }
        }
    }

    async fn create_bucket(&self, name: &str, location_constraint: Option<&str>) -> ApiResult<()> {
        let mut request = self.client.create_bucket().bucket(name);

        if let Some(region) = location_constraint {
            let config = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build();
            request = request.create_bucket_configuration(config);
        }

        debug!("CreateBucket {} (location {:?})", name, location_constraint);
        request.send().await.map_err(sdk_error)?;
        Ok(())
    }

    async fn put_bucket_versioning(&self, name: &str, status: VersioningStatus) -> ApiResult<()> {
        let config = VersioningConfiguration::builder()
            .status(versioning_status(status))
            .build();

        self.client
            .put_bucket_versioning()
            .bucket(name)
            .versioning_configuration(config)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn put_bucket_encryption(&self, name: &str, algorithm: SseAlgorithm) -> ApiResult<()> {
        let by_default = ServerSideEncryptionByDefault::builder()
            .sse_algorithm(sse_algorithm(algorithm))
            .build()
            .map_err(build_error)?;
        let rule = ServerSideEncryptionRule::builder()
            .apply_server_side_encryption_by_default(by_default)
            .build();
        let config = ServerSideEncryptionConfiguration::builder()
            .rules(rule)
            .build()
            .map_err(build_error)?;

        self.client
            .put_bucket_encryption()
            .bucket(name)
            .server_side_encryption_configuration(config)
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn put_public_access_block(
        &self,
        name: &str,
        block: PublicAccessBlock,
    ) -> ApiResult<()> {
        self.client
            .put_public_access_block()
            .bucket(name)
            .public_access_block_configuration(public_access_block(block))
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }
}

fn versioning_status(status: VersioningStatus) -> BucketVersioningStatus {
    match status {
        VersioningStatus::Enabled => BucketVersioningStatus::Enabled,
    }
}

fn sse_algorithm(algorithm: SseAlgorithm) -> ServerSideEncryption {
    match algorithm {
        SseAlgorithm::Aes256 => ServerSideEncryption::Aes256,
    }
}

fn public_access_block(block: PublicAccessBlock) -> PublicAccessBlockConfiguration {
    PublicAccessBlockConfiguration::builder()
        .block_public_acls(block.block_public_acls)
        .ignore_public_acls(block.ignore_public_acls)
        .block_public_policy(block.block_public_policy)
        .restrict_public_buckets(block.restrict_public_buckets)
        .build()
}
