//! In-memory provider double for tests

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, ApiResult, BucketApi, LockTableApi, TableStatus};
use crate::resource::{LockTableSpec, PublicAccessBlock, SseAlgorithm, VersioningStatus};

/// A recorded provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    HeadBucket(String),
    CreateBucket {
        name: String,
        location_constraint: Option<String>,
    },
    PutBucketVersioning(String, VersioningStatus),
    PutBucketEncryption(String, SseAlgorithm),
    PutPublicAccessBlock(String, PublicAccessBlock),
    DescribeTable(String),
    CreateTable(LockTableSpec),
}

impl Call {
    fn is_mutating(&self) -> bool {
        !matches!(self, Call::HeadBucket(_) | Call::DescribeTable(_))
    }
}

/// A call that should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    HeadBucket,
    CreateBucket,
    PutBucketVersioning,
    PutBucketEncryption,
    PutPublicAccessBlock,
    /// DescribeTable before the table was created
    DescribeTable,
    CreateTable,
    /// DescribeTable while waiting for a created table
    PollTable,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<Call>,
    buckets: HashSet<String>,
    tables: HashSet<String>,
    /// Statuses returned for a newly created table, the last one repeats
    statuses: VecDeque<TableStatus>,
    invisible_polls: u32,
}

/// Recording double implementing both capability traits
#[derive(Debug)]
pub struct MemoryCloud {
    inner: Mutex<Inner>,
    faults: HashMap<Fault, String>,
}

impl MemoryCloud {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            faults: HashMap::new(),
        }
    }

    pub fn with_bucket(self, name: &str) -> Self {
        self.inner.lock().unwrap().buckets.insert(name.to_string());
        self
    }

    pub fn with_table(self, name: &str) -> Self {
        self.inner.lock().unwrap().tables.insert(name.to_string());
        self
    }

    pub fn with_table_statuses(self, statuses: impl IntoIterator<Item = TableStatus>) -> Self {
        self.inner.lock().unwrap().statuses = statuses.into_iter().collect();
        self
    }

    /// Report NotFound for the first `polls` status checks after creation
    pub fn with_invisible_polls(self, polls: u32) -> Self {
        self.inner.lock().unwrap().invisible_polls = polls;
        self
    }

    pub fn failing(mut self, fault: Fault, message: &str) -> Self {
        self.faults.insert(fault, message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn mutating_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutating()).count()
    }

    pub fn table_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::DescribeTable(_) | Call::CreateTable(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.inner.lock().unwrap().calls.push(call);
    }

    fn fault(&self, fault: Fault) -> ApiResult<()> {
        match self.faults.get(&fault) {
            Some(message) => Err(ApiError::service(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BucketApi for MemoryCloud {
    async fn head_bucket(&self, name: &str) -> ApiResult<()> {
        self.record(Call::HeadBucket(name.to_string()));
        self.fault(Fault::HeadBucket)?;
        if self.inner.lock().unwrap().buckets.contains(name) {
            Ok(())
        } else {
            Err(ApiError::NotFound)
        }
    }

    async fn create_bucket(&self, name: &str, location_constraint: Option<&str>) -> ApiResult<()> {
        self.record(Call::CreateBucket {
            name: name.to_string(),
            location_constraint: location_constraint.map(str::to_string),
        });
        self.fault(Fault::CreateBucket)?;
        self.inner.lock().unwrap().buckets.insert(name.to_string());
        Ok(())
    }

    async fn put_bucket_versioning(&self, name: &str, status: VersioningStatus) -> ApiResult<()> {
        self.record(Call::PutBucketVersioning(name.to_string(), status));
        self.fault(Fault::PutBucketVersioning)
    }

    async fn put_bucket_encryption(&self, name: &str, algorithm: SseAlgorithm) -> ApiResult<()> {
        self.record(Call::PutBucketEncryption(name.to_string(), algorithm));
        self.fault(Fault::PutBucketEncryption)
    }

    async fn put_public_access_block(
        &self,
        name: &str,
        block: PublicAccessBlock,
    ) -> ApiResult<()> {
        self.record(Call::PutPublicAccessBlock(name.to_string(), block));
        self.fault(Fault::PutPublicAccessBlock)
    }
}

#[async_trait]
impl LockTableApi for MemoryCloud {
    async fn describe_table(&self, name: &str) -> ApiResult<TableStatus> {
        self.record(Call::DescribeTable(name.to_string()));

        let created = self
            .calls()
            .iter()
            .any(|c| matches!(c, Call::CreateTable(t) if t.name() == name));
        if !created {
            self.fault(Fault::DescribeTable)?;
            return if self.inner.lock().unwrap().tables.contains(name) {
                Ok(TableStatus::Active)
            } else {
                Err(ApiError::NotFound)
            };
        }

        self.fault(Fault::PollTable)?;
        let mut inner = self.inner.lock().unwrap();
        if inner.invisible_polls > 0 {
            inner.invisible_polls -= 1;
            return Err(ApiError::NotFound);
        }
        let status = if inner.statuses.len() > 1 {
            inner.statuses.pop_front()
        } else {
            inner.statuses.front().cloned()
        };
        Ok(status.unwrap_or(TableStatus::Active))
    }

    async fn create_table(&self, table: &LockTableSpec) -> ApiResult<()> {
        self.record(Call::CreateTable(table.clone()));
        self.fault(Fault::CreateTable)?;
        self.inner
            .lock()
            .unwrap()
            .tables
            .insert(table.name().to_string());
        Ok(())
    }
}
