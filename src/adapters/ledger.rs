//! File-backed execution ledger
//!
//! One JSON record per execution at `<root>/<execution_id>.json`. An event that
//! keeps being redelivered is detected by its attempt count: once a record has
//! been started `loop_detection_threshold` times, further writes for it are
//! skipped.

use crate::adapters::traits::ExecutionLedger;
use crate::core::execution::{ExecutionFailure, ExecutionRecord, ExecutionStatus};
use crate::domain::errors::{ErrorDetail, LedgerError};
use crate::domain::ids::ExecutionId;
use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Execution ledger stored as JSON files
#[derive(Debug)]
pub struct FileExecutionLedger {
    root: PathBuf,
    loop_detection_threshold: u32,
    looping: Mutex<HashSet<ExecutionId>>,
}

impl FileExecutionLedger {
    pub fn new(root: impl Into<PathBuf>, loop_detection_threshold: u32) -> Self {
        Self {
            root: root.into(),
            loop_detection_threshold,
            looping: Mutex::new(HashSet::new()),
        }
    }

    fn record_path(&self, execution_id: &ExecutionId) -> PathBuf {
        self.root.join(format!("{execution_id}.json"))
    }

    /// Loads a record if one exists
    pub async fn load(&self, execution_id: &ExecutionId) -> Result<Option<ExecutionRecord>> {
        let path = self.record_path(execution_id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                LedgerError::ReadFailed(format!("{}: {e}", path.display())).into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::ReadFailed(format!("{}: {e}", path.display())).into()),
        }
    }

    async fn save(&self, record: &ExecutionRecord) -> Result<()> {
        let write_failed = |message: String| LedgerError::WriteFailed {
            execution_id: record.execution_id.to_string(),
            message,
        };

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| write_failed(e.to_string()))?;
        let body = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(self.record_path(&record.execution_id), body)
            .await
            .map_err(|e| write_failed(e.to_string()))?;

        Ok(())
    }

    async fn is_looping(&self, execution_id: &ExecutionId) -> bool {
        self.looping.lock().await.contains(execution_id)
    }
}

#[async_trait]
impl ExecutionLedger for FileExecutionLedger {
    async fn record_new(&self, execution_id: &ExecutionId, input: &Value) -> Result<()> {
        let record = match self.load(execution_id).await? {
            Some(mut existing) => {
                if existing.attempts >= self.loop_detection_threshold {
                    self.looping.lock().await.insert(execution_id.clone());
                    tracing::warn!(
                        execution_id = %execution_id,
                        attempts = existing.attempts,
                        threshold = self.loop_detection_threshold,
                        "Execution loop detected, skipping ledger writes"
                    );
                    return Ok(());
                }
                existing.record_attempt();
                existing
            }
            None => ExecutionRecord::new(execution_id.clone(), input.clone()),
        };

        self.save(&record).await?;
        tracing::debug!(execution_id = %execution_id, attempts = record.attempts, "Recorded new execution");
        Ok(())
    }

    async fn mark_successful(&self, execution_id: &ExecutionId) -> Result<()> {
        if self.is_looping(execution_id).await {
            return Ok(());
        }

        let mut record = self
            .load(execution_id)
            .await?
            .unwrap_or_else(|| ExecutionRecord::new(execution_id.clone(), Value::Null));
        record.mark_successful();
        self.save(&record).await
    }

    async fn record_failed(
        &self,
        execution_id: &ExecutionId,
        error: ErrorDetail,
    ) -> Result<ExecutionFailure> {
        let failure = ExecutionFailure {
            execution_id: execution_id.clone(),
            error,
        };

        if self.is_looping(execution_id).await {
            return Ok(failure);
        }

        let mut record = self
            .load(execution_id)
            .await?
            .unwrap_or_else(|| ExecutionRecord::new(execution_id.clone(), Value::Null));
        record.mark_failed(failure.error.clone());
        self.save(&record).await?;

        Ok(failure)
    }

    async fn list(&self, status: Option<ExecutionStatus>) -> Result<Vec<ExecutionRecord>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LedgerError::ReadFailed(e.to_string()).into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LedgerError::ReadFailed(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| LedgerError::ReadFailed(format!("{}: {e}", path.display())))?;
            match serde_json::from_slice::<ExecutionRecord>(&bytes) {
                Ok(record) if status.map_or(true, |s| record.status == s) => records.push(record),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable execution record");
                }
            }
        }

        records.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(records)
    }
}
