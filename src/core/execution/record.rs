//! Execution ledger records
//!
//! One record per execution id. A redelivered event reuses its record and
//! bumps the attempt count, which is what loop detection keys on.

use crate::domain::errors::ErrorDetail;
use crate::domain::ids::ExecutionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Recorded, not yet finished
    New,
    /// Finished without processing errors
    Successful,
    /// Finished with a fatal error or at least one key failure
    Failed,
}

impl Default for ExecutionStatus {
    fn default() -> Self {
        Self::New
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Successful => write!(f, "successful"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "successful" => Ok(Self::Successful),
            "failed" => Ok(Self::Failed),
            other => Err(format!(
                "unknown execution status '{other}', expected one of: new, successful, failed"
            )),
        }
    }
}

/// Persisted state of one execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub execution_id: ExecutionId,

    pub status: ExecutionStatus,

    /// The event that started the execution
    pub input: Value,

    /// How many times the execution has been started
    pub attempts: u32,

    pub started_at: DateTime<Utc>,

    pub completed_at: Option<DateTime<Utc>>,

    /// Set when the execution failed
    pub failure: Option<ErrorDetail>,
}

impl ExecutionRecord {
    /// Creates a record for a first attempt
    pub fn new(execution_id: ExecutionId, input: Value) -> Self {
        Self {
            execution_id,
            status: ExecutionStatus::New,
            input,
            attempts: 1,
            started_at: Utc::now(),
            completed_at: None,
            failure: None,
        }
    }

    /// Resets the record for another attempt of the same execution
    pub fn record_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
        self.status = ExecutionStatus::New;
        self.started_at = Utc::now();
        self.completed_at = None;
        self.failure = None;
    }

    pub fn mark_successful(&mut self) {
        self.status = ExecutionStatus::Successful;
        self.completed_at = Some(Utc::now());
        self.failure = None;
    }

    pub fn mark_failed(&mut self, failure: ErrorDetail) {
        self.status = ExecutionStatus::Failed;
        self.completed_at = Some(Utc::now());
        self.failure = Some(failure);
    }

    pub fn is_failed(&self) -> bool {
        self.status == ExecutionStatus::Failed
    }

    /// Duration of the last attempt if it finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.completed_at.map(|completed| completed - self.started_at)
    }
}

/// Structured failure returned by the ledger when an execution fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionFailure {
    pub execution_id: ExecutionId,
    pub error: ErrorDetail,
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execution {} failed: {}", self.execution_id, self.error)
    }
}
