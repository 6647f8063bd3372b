//! Provisioning error types

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Which of the two backend resources an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Bucket,
    LockTable,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Bucket => write!(f, "S3 bucket"),
            ResourceKind::LockTable => write!(f, "DynamoDB table"),
        }
    }
}

/// The provisioning step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Probe,
    Create,
    Versioning,
    Encryption,
    PublicAccessBlock,
    WaitActive,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Step::Probe => "existence check",
            Step::Create => "create",
            Step::Versioning => "enable versioning",
            Step::Encryption => "enable default encryption",
            Step::PublicAccessBlock => "block public access",
            Step::WaitActive => "wait for table to become active",
        };
        f.write_str(step)
    }
}

/// Errors that abort a provisioning run
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Project or region input rejected before any API call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A provider API call failed
    #[error("{resource} '{name}': {step} failed: {message}")]
    Api {
        resource: ResourceKind,
        name: String,
        step: Step,
        message: String,
    },

    /// The lock table never reached ACTIVE within the wait bound
    #[error(
        "Timed out waiting for DynamoDB table '{table}' to become active \
         ({attempts} checks within the {}s limit)",
        .timeout.as_secs()
    )]
    Timeout {
        table: String,
        attempts: u32,
        /// The configured wait bound, not the measured elapsed time
        timeout: Duration,
    },
}

impl ProvisionError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an API error for a bucket step
    pub fn bucket(name: &str, step: Step, message: impl Into<String>) -> Self {
        Self::Api {
            resource: ResourceKind::Bucket,
            name: name.to_string(),
            step,
            message: message.into(),
        }
    }

    /// Create an API error for a lock table step
    pub fn lock_table(name: &str, step: Step, message: impl Into<String>) -> Self {
        Self::Api {
            resource: ResourceKind::LockTable,
            name: name.to_string(),
            step,
            message: message.into(),
        }
    }

    /// The resource that failed, if the error happened while provisioning one
    pub fn resource(&self) -> Option<ResourceKind> {
        match self {
            Self::InvalidInput(_) => None,
            Self::Api { resource, .. } => Some(*resource),
            Self::Timeout { .. } => Some(ResourceKind::LockTable),
        }
    }

    /// Whether this is a wait-bound timeout rather than an API failure
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;
