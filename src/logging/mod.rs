//! Logging and observability
//!
//! - Console and JSON file logging ([`init_logging`])
//! - Progress checkpoints over tracing ([`TracingProgressTracker`])
//!
//! # Example
//!
//! ```no_run
//! use edi_inbound::logging::init_logging;
//! use edi_inbound::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(key = "acme/inbound/po.edi", "Processing key");
//! ```

pub mod progress;
pub mod structured;

pub use progress::{TracingProgressTracker, PROGRESS_TARGET};
pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};
