//! Execution identity and ledger records

pub mod id;
pub mod record;

pub use id::generate_execution_id;
pub use record::{ExecutionFailure, ExecutionRecord, ExecutionStatus};
