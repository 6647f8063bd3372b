//! Rendering of the Terraform `backend "s3"` block

use std::fmt;

use crate::resource::{BucketSpec, LockTableSpec};

/// State object key written into the backend block
pub const STATE_KEY: &str = "env/terraform.tfstate";

/// The backend configuration to paste into a Terraform root module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendBlock {
    pub bucket: String,
    pub key: String,
    pub region: String,
    pub dynamodb_table: String,
    pub encrypt: bool,
}

impl BackendBlock {
    /// Build the block for a provisioned bucket and lock table
    pub fn new(bucket: &BucketSpec, table: &LockTableSpec) -> Self {
        Self {
            bucket: bucket.name().to_string(),
            key: STATE_KEY.to_string(),
            region: bucket.region().to_string(),
            dynamodb_table: table.name().to_string(),
            encrypt: true,
        }
    }
}

impl fmt::Display for BackendBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "terraform {{")?;
        writeln!(f, "  backend \"s3\" {{")?;
        writeln!(f, "    bucket         = \"{}\"", self.bucket)?;
        writeln!(f, "    key            = \"{}\"", self.key)?;
        writeln!(f, "    region         = \"{}\"", self.region)?;
        writeln!(f, "    dynamodb_table = \"{}\"", self.dynamodb_table)?;
        writeln!(f, "    encrypt        = {}", self.encrypt)?;
        writeln!(f, "  }}")?;
        writeln!(f, "}}")
    }
}
