//! State bucket provisioning

use std::fmt;

use log::{debug, info};

use crate::api::{ApiError, BucketApi};
use crate::error::{ProvisionError, ProvisionResult, Step};
use crate::resource::{BucketSpec, PublicAccessBlock, SseAlgorithm, VersioningStatus};

/// A setting applied to a freshly created bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSetting {
    Versioning,
    Encryption,
    PublicAccessBlock,
}

impl fmt::Display for BucketSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketSetting::Versioning => write!(f, "Enabled bucket versioning"),
            BucketSetting::Encryption => write!(f, "Enabled default encryption"),
            BucketSetting::PublicAccessBlock => write!(f, "Blocked public access"),
        }
    }
}

/// What `BucketProvisioner::ensure` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketOutcome {
    /// The bucket was already there; nothing was changed
    AlreadyExists,
    /// The bucket was created and the listed settings applied, in order
    Created { applied: Vec<BucketSetting> },
}

/// Ensures the state bucket exists
pub struct BucketProvisioner<'a, A: BucketApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: BucketApi + ?Sized> BucketProvisioner<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Create the bucket unless it already exists.
    ///
    /// An existing bucket is left untouched even if its settings differ.
    /// A new bucket gets versioning, AES256 default encryption and all four
    /// public access block flags, in that order. Any failure aborts.
    pub async fn ensure(&self, spec: &BucketSpec) -> ProvisionResult<BucketOutcome> {
        let name = spec.name();

        debug!("Checking whether bucket {} exists", name);
        match self.api.head_bucket(name).await {
            Ok(()) => {
                info!("Bucket {} already exists", name);
                return Ok(BucketOutcome::AlreadyExists);
            }
            Err(ApiError::NotFound) => {}
            Err(err) => return Err(ProvisionError::bucket(name, Step::Probe, err.to_string())),
        }

        self.api
            .create_bucket(name, spec.location_constraint())
            .await
            .map_err(|e| ProvisionError::bucket(name, Step::Create, e.to_string()))?;
        info!("Created S3 bucket {} in {}", name, spec.region());

        let mut applied = Vec::with_capacity(3);

        self.api
            .put_bucket_versioning(name, VersioningStatus::Enabled)
            .await
            .map_err(|e| ProvisionError::bucket(name, Step::Versioning, e.to_string()))?;
        info!("Enabled versioning on {}", name);
        applied.push(BucketSetting::Versioning);

        self.api
            .put_bucket_encryption(name, SseAlgorithm::Aes256)
            .await
            .map_err(|e| ProvisionError::bucket(name, Step::Encryption, e.to_string()))?;
        info!("Enabled default encryption on {}", name);
        applied.push(BucketSetting::Encryption);

        self.api
            .put_public_access_block(name, PublicAccessBlock::all())
            .await
            .map_err(|e| ProvisionError::bucket(name, Step::PublicAccessBlock, e.to_string()))?;
        info!("Blocked public access on {}", name);
        applied.push(BucketSetting::PublicAccessBlock);

        Ok(BucketOutcome::Created { applied })
    }
}
