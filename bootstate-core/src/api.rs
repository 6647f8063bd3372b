//! Provider capability traits
//!
//! The provisioners never talk to a cloud SDK directly. They receive an
//! implementation of these traits, which the AWS provider crate supplies for
//! real runs and tests replace with an in-memory double.

use async_trait::async_trait;
use thiserror::Error;

use crate::resource::{LockTableSpec, PublicAccessBlock, SseAlgorithm, VersioningStatus};

/// Errors returned by provider API calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The resource does not exist (HTTP 404 / ResourceNotFoundException)
    #[error("not found")]
    NotFound,

    /// Any other failure: permissions, throttling, network
    #[error("{0}")]
    Service(String),
}

impl ApiError {
    /// Create a service error
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result type for provider API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Lifecycle status reported by DescribeTable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Creating,
    Active,
    Updating,
    Deleting,
    Other(String),
}

impl TableStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Object storage operations used on the state bucket
#[async_trait]
pub trait BucketApi: Send + Sync {
    /// Probe the bucket. `Err(ApiError::NotFound)` when it does not exist.
    async fn head_bucket(&self, name: &str) -> ApiResult<()>;

    /// Create the bucket, with a location constraint unless `None`
    async fn create_bucket(&self, name: &str, location_constraint: Option<&str>) -> ApiResult<()>;

    async fn put_bucket_versioning(&self, name: &str, status: VersioningStatus) -> ApiResult<()>;

    /// Set the bucket's default server-side encryption
    async fn put_bucket_encryption(&self, name: &str, algorithm: SseAlgorithm) -> ApiResult<()>;

    async fn put_public_access_block(
        &self,
        name: &str,
        block: PublicAccessBlock,
    ) -> ApiResult<()>;
}

/// Key-value table operations used on the lock table
#[async_trait]
pub trait LockTableApi: Send + Sync {
    /// Probe the table. `Err(ApiError::NotFound)` when it does not exist.
    async fn describe_table(&self, name: &str) -> ApiResult<TableStatus>;

    /// Create the table with the descriptor's partition key and billing mode
    async fn create_table(&self, table: &LockTableSpec) -> ApiResult<()>;
}
