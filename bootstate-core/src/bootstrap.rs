//! Provisioning sequence for the whole backend
//!
//! The bucket is provisioned first. The lock table is only touched once the
//! bucket succeeded, and the backend block is only produced once both did.

use log::info;

use crate::api::{BucketApi, LockTableApi};
use crate::bucket::{BucketOutcome, BucketProvisioner};
use crate::error::ProvisionResult;
use crate::lock_table::{LockTableProvisioner, TableOutcome, WaitPolicy};
use crate::render::BackendBlock;
use crate::resource::{BucketSpec, LockTableSpec};
use crate::validation::{validate_bucket_name, validate_project, validate_region};

/// Validated inputs for one run, with the derived resource descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRequest {
    project: String,
    bucket: BucketSpec,
    table: LockTableSpec,
}

impl BackendRequest {
    /// Validate the inputs and derive the bucket and lock table descriptors
    pub fn new(project: &str, region: &str) -> ProvisionResult<Self> {
        let project = validate_project(project)?;
        validate_region(region)?;

        let bucket = BucketSpec::for_project(project, region);
        validate_bucket_name(bucket.name())?;

        Ok(Self {
            project: project.to_string(),
            bucket,
            table: LockTableSpec::shared(region),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn bucket(&self) -> &BucketSpec {
        &self.bucket
    }

    pub fn table(&self) -> &LockTableSpec {
        &self.table
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub bucket: BucketOutcome,
    pub table: TableOutcome,
    pub backend: BackendBlock,
}

impl BootstrapReport {
    /// Whether the run created anything
    pub fn changed(&self) -> bool {
        !matches!(self.bucket, BucketOutcome::AlreadyExists)
            || !matches!(self.table, TableOutcome::AlreadyExists)
    }
}

/// Provision the bucket, then the lock table, then render the backend block.
///
/// The first error aborts the run; the lock table is never probed if the
/// bucket failed.
pub async fn bootstrap<B, T>(
    bucket_api: &B,
    table_api: &T,
    request: &BackendRequest,
    wait: &WaitPolicy,
) -> ProvisionResult<BootstrapReport>
where
    B: BucketApi + ?Sized,
    T: LockTableApi + ?Sized,
{
    info!(
        "Provisioning Terraform backend for project {} in {}",
        request.project(),
        request.bucket().region()
    );

    let bucket = BucketProvisioner::new(bucket_api)
        .ensure(request.bucket())
        .await?;
    let table = LockTableProvisioner::new(table_api, *wait)
        .ensure(request.table())
        .await?;

    Ok(BootstrapReport {
        bucket,
        table,
        backend: BackendBlock::new(request.bucket(), request.table()),
    })
}
