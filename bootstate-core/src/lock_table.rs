//! Lock table provisioning

use std::time::Duration;

use log::{debug, info};

use crate::api::{ApiError, LockTableApi};
use crate::error::{ProvisionError, ProvisionResult, Step};
use crate::resource::LockTableSpec;

/// Default delay between DescribeTable polls (matches the SDK table waiter)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 20;

/// Default bound on waiting for the table to become active (25 polls)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 500;

/// Bounded polling policy for the wait-for-active step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    interval: Duration,
    timeout: Duration,
}

impl WaitPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of status checks allowed, at least one
    pub fn max_attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let attempts = self.timeout.as_nanos().div_ceil(self.interval.as_nanos());
        u32::try_from(attempts).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
        )
    }
}

/// What `LockTableProvisioner::ensure` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// The table was already there; nothing was changed
    AlreadyExists,
    /// The table was created and became active after `polls` status checks
    Created { polls: u32 },
}

/// Ensures the state lock table exists and is usable
pub struct LockTableProvisioner<'a, A: LockTableApi + ?Sized> {
    api: &'a A,
    wait: WaitPolicy,
}

impl<'a, A: LockTableApi + ?Sized> LockTableProvisioner<'a, A> {
    pub fn new(api: &'a A, wait: WaitPolicy) -> Self {
        Self { api, wait }
    }

    /// Create the lock table unless it already exists, then wait for ACTIVE.
    ///
    /// An existing table is accepted whatever its schema or status.
    pub async fn ensure(&self, spec: &LockTableSpec) -> ProvisionResult<TableOutcome> {
        let name = spec.name();

        debug!("Checking whether table {} exists", name);
        match self.api.describe_table(name).await {
            Ok(status) => {
                info!("DynamoDB table {} already exists ({:?})", name, status);
                return Ok(TableOutcome::AlreadyExists);
            }
            Err(ApiError::NotFound) => {}
            Err(err) => {
                return Err(ProvisionError::lock_table(
                    name,
                    Step::Probe,
                    err.to_string(),
                ));
            }
        }

        self.api
            .create_table(spec)
            .await
            .map_err(|e| ProvisionError::lock_table(name, Step::Create, e.to_string()))?;
        info!(
            "Created DynamoDB table {} (key {}, on-demand billing)",
            name,
            spec.partition_key()
        );

        let polls = self.wait_until_active(name).await?;
        Ok(TableOutcome::Created { polls })
    }

    /// Poll DescribeTable until ACTIVE, up to `max_attempts` checks.
    ///
    /// NotFound counts as "not yet", since a new table may not be visible to
    /// DescribeTable immediately after CreateTable returns.
    async fn wait_until_active(&self, name: &str) -> ProvisionResult<u32> {
        let max_attempts = self.wait.max_attempts();

        for attempt in 1..=max_attempts {
            match self.api.describe_table(name).await {
                Ok(status) if status.is_active() => {
                    info!("DynamoDB table {} is active", name);
                    return Ok(attempt);
                }
                Ok(status) => {
                    debug!(
                        "Table {} is {:?} (check {}/{})",
                        name, status, attempt, max_attempts
                    );
                }
                Err(ApiError::NotFound) => {
                    debug!(
                        "Table {} not visible yet (check {}/{})",
                        name, attempt, max_attempts
                    );
                }
                Err(err) => {
                    return Err(ProvisionError::lock_table(
                        name,
                        Step::WaitActive,
                        err.to_string(),
                    ));
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.wait.interval()).await;
            }
        }

        Err(ProvisionError::Timeout {
            table: name.to_string(),
            attempts: max_attempts,
            timeout: self.wait.timeout(),
        })
    }
}
