//! Inbound processing pipeline
//!
//! # Example
//!
//! ```rust,no_run
//! use edi_inbound::adapters::build_pipeline;
//! use edi_inbound::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("edi-inbound.toml")?;
//! let pipeline = build_pipeline(&config)?;
//!
//! let event = serde_json::json!({ "Records": [] });
//! let outcome = pipeline.handle(event).await;
//! println!("success: {}", outcome.is_success());
//! # Ok(())
//! # }
//! ```

pub mod orchestrator;
pub mod results;

pub use orchestrator::{InboundPipeline, PipelineCollaborators};
pub use results::{failure_message, InvocationOutcome, ProcessingError, ProcessingResults};
