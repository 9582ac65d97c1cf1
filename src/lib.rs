// EDI Inbound - Inbound EDI processing pipeline
// Copyright (c) 2025 EDI Inbound Contributors
// Licensed under the MIT License

//! # EDI Inbound
//!
//! Processes storage notifications for inbound X12 files: each new object
//! under an `inbound` directory is fetched, split into one document per
//! functional group, routed through the partnership between its trading
//! partners, transformed and delivered to every configured destination,
//! then deleted.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface
//! - [`core`] - Classification, routing, control numbers, executions, the pipeline
//! - [`adapters`] - Collaborator traits and their local implementations
//! - [`domain`] - Identifiers, events, documents, partnerships, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and progress checkpoints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edi_inbound::adapters::build_pipeline;
//! use edi_inbound::config::load_config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("edi-inbound.toml")?;
//!     let pipeline = build_pipeline(&config)?;
//!
//!     let event = serde_json::json!({
//!         "Records": [{
//!             "eventName": "ObjectCreated:Put",
//!             "s3": {
//!                 "bucket": { "name": "edi" },
//!                 "object": { "key": "acme/inbound/po-1001.edi" }
//!             }
//!         }]
//!     });
//!
//!     let outcome = pipeline.handle(event).await;
//!     if let Some(results) = outcome.results() {
//!         println!("processed {} key(s)", results.processed_keys.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`] with [`domain::EdiError`].
//! [`core::pipeline::InboundPipeline::handle`] never fails: per-key errors
//! are collected into the results, anything else becomes a failed outcome.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
