//! Resource descriptors for the two backend resources
//!
//! Descriptors are built once per run and never mutated afterwards.

/// Suffix appended to the project name to form the state bucket name
pub const BUCKET_SUFFIX: &str = "-terraform-state";

/// Name of the lock table. Not derived from the project, so every project
/// bootstrapped in a region shares the same table.
pub const LOCK_TABLE_NAME: &str = "terraform-state-lock";

/// Partition key Terraform's S3 backend uses for lock records
pub const LOCK_PARTITION_KEY: &str = "LockID";

/// Region that S3 treats as the implicit default location
pub const DEFAULT_LOCATION_REGION: &str = "us-east-1";

/// The state bucket to provision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    name: String,
    region: String,
}

impl BucketSpec {
    /// Create a bucket descriptor with an explicit name
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }

    /// Derive the bucket descriptor for a project (`<project>-terraform-state`)
    pub fn for_project(project: &str, region: impl Into<String>) -> Self {
        Self::new(format!("{}{}", project, BUCKET_SUFFIX), region)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Location constraint to send with CreateBucket.
    ///
    /// S3 rejects an explicit `us-east-1` constraint, so it is omitted for
    /// that region only.
    pub fn location_constraint(&self) -> Option<&str> {
        if self.region == DEFAULT_LOCATION_REGION {
            None
        } else {
            Some(&self.region)
        }
    }
}

/// The state lock table to provision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockTableSpec {
    name: String,
    region: String,
    partition_key: String,
}

impl LockTableSpec {
    /// Create a lock table descriptor with an explicit name
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            partition_key: LOCK_PARTITION_KEY.to_string(),
        }
    }

    /// The region-wide lock table (`terraform-state-lock`)
    pub fn shared(region: impl Into<String>) -> Self {
        Self::new(LOCK_TABLE_NAME, region)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// Type of the partition key attribute
    pub fn key_type(&self) -> KeyAttributeType {
        KeyAttributeType::String
    }

    /// Capacity mode of the table
    pub fn billing_mode(&self) -> BillingMode {
        BillingMode::PayPerRequest
    }
}

/// Bucket versioning status applied after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersioningStatus {
    Enabled,
}

/// Default server-side encryption algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseAlgorithm {
    /// SSE-S3, keys managed by the provider
    Aes256,
}

/// Public access block flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicAccessBlock {
    pub block_public_acls: bool,
    pub ignore_public_acls: bool,
    pub block_public_policy: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// All four flags set
    pub fn all() -> Self {
        Self {
            block_public_acls: true,
            ignore_public_acls: true,
            block_public_policy: true,
            restrict_public_buckets: true,
        }
    }
}

/// Scalar type of the table's partition key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAttributeType {
    String,
}

/// Table capacity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    /// On-demand capacity, no provisioned throughput
    PayPerRequest,
}
