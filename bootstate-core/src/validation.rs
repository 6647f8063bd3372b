//! Input validation for project, region and derived bucket names
//!
//! Checks run before any API call so that a bad name fails fast with a clear
//! message instead of an opaque provider error.

use crate::error::{ProvisionError, ProvisionResult};

/// Validate the project name. Returns it with surrounding whitespace removed.
pub fn validate_project(project: &str) -> ProvisionResult<&str> {
    let project = project.trim();
    if project.is_empty() {
        return Err(ProvisionError::invalid_input(
            "project name must not be empty",
        ));
    }
    Ok(project)
}

/// Prefixes S3 reserves for its own bucket names
const RESERVED_PREFIXES: &[&str] = &["xn--", "sthree-", "amzn-s3-demo-"];

/// Suffixes S3 reserves for access point and Object Lambda aliases
const RESERVED_SUFFIXES: &[&str] = &["-s3alias", "--ol-s3"];

/// Validate a region identifier such as `us-west-2`
pub fn validate_region(region: &str) -> ProvisionResult<()> {
    if region.is_empty() {
        return Err(ProvisionError::invalid_input("region must not be empty"));
    }

    let charset_ok = region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let parts: Vec<&str> = region.split('-').collect();
    if !charset_ok || parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(ProvisionError::invalid_input(format!(
            "invalid region '{}', expected a region code like us-west-2",
            region
        )));
    }
    Ok(())
}

/// Validate an S3 bucket name against the general-purpose bucket naming rules
pub fn validate_bucket_name(name: &str) -> ProvisionResult<()> {
    if name.len() < 3 || name.len() > 63 {
        return Err(ProvisionError::invalid_input(format!(
            "bucket name '{}' must be between 3 and 63 characters, got {}",
            name,
            name.len()
        )));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '.'))
    {
        return Err(ProvisionError::invalid_input(format!(
            "bucket name '{}' contains invalid character '{}' \
             (only lowercase letters, digits, hyphens and dots are allowed)",
            name, c
        )));
    }

    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !name.starts_with(alnum) || !name.ends_with(alnum) {
        return Err(ProvisionError::invalid_input(format!(
            "bucket name '{}' must start and end with a letter or digit",
            name
        )));
    }

    if name.contains("..") {
        return Err(ProvisionError::invalid_input(format!(
            "bucket name '{}' must not contain two adjacent dots",
            name
        )));
    }

    if is_ipv4_shaped(name) {
        return Err(ProvisionError::invalid_input(format!(
            "bucket name '{}' must not be formatted as an IP address",
            name
        )));
    }

    if let Some(prefix) = RESERVED_PREFIXES.iter().find(|p| name.starts_with(**p)) {
        return Err(ProvisionError::invalid_input(format!(
            "bucket name '{}' must not start with the reserved prefix '{}'",
            name, prefix
        )));
    }

    if let Some(suffix) = RESERVED_SUFFIXES.iter().find(|s| name.ends_with(**s)) {
        return Err(ProvisionError::invalid_input(format!(
            "bucket name '{}' must not end with the reserved suffix '{}'",
            name, suffix
        )));
    }

    Ok(())
}

/// Four dot-separated groups of one to three digits, e.g. `192.168.5.4`
fn is_ipv4_shaped(name: &str) -> bool {
    let groups: Vec<&str> = name.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()))
}
