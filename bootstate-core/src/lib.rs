//! Bootstate Core
//!
//! Provisions the two resources a Terraform S3 remote-state backend needs:
//! an S3 bucket for the state files and a DynamoDB table for state locking.
//!
//! # Overview
//!
//! - **BucketProvisioner**: ensures the state bucket exists, and configures a
//!   freshly created one with versioning, default encryption and a full
//!   public-access block
//! - **LockTableProvisioner**: ensures the lock table exists and waits, within
//!   a bound, until it is active
//! - **bootstrap**: runs both in order and renders the `backend "s3"` block
//!
//! The cloud provider is reached only through the [`BucketApi`] and
//! [`LockTableApi`] traits, so the provisioning sequence can run against any
//! implementation.
//!
//! # Example
//!
//! ```ignore
//! use bootstate_core::{BackendRequest, WaitPolicy, bootstrap};
//!
//! let request = BackendRequest::new("acme", "us-west-2")?;
//! let report = bootstrap(&s3, &dynamodb, &request, &WaitPolicy::default()).await?;
//! print!("{}", report.backend);
//! ```

pub mod api;
pub mod bootstrap;
pub mod bucket;
pub mod error;
pub mod lock_table;
pub mod render;
pub mod resource;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use api::{ApiError, ApiResult, BucketApi, LockTableApi, TableStatus};
pub use bootstrap::{BackendRequest, BootstrapReport, bootstrap};
pub use bucket::{BucketOutcome, BucketProvisioner, BucketSetting};
pub use error::{ProvisionError, ProvisionResult, ResourceKind, Step};
pub use lock_table::{LockTableProvisioner, TableOutcome, WaitPolicy};
pub use render::BackendBlock;
pub use resource::{BucketSpec, LockTableSpec};
