//! External system integrations
//!
//! Every collaborator of the pipeline sits behind a trait in [`traits`]; the
//! remaining modules are local implementations:
//!
//! - [`storage`] - Object stores (directory-backed and in-memory)
//! - [`partnership`] - Partnership documents and partner id resolution
//! - [`x12`] - X12 splitting and translation
//! - [`guides`] - Guide catalog lookup
//! - [`delivery`] - Webhook and bucket destinations
//! - [`ledger`] - Execution ledger
//! - [`counter`] - Counter stores for control numbers
//! - [`factory`] - Wires the above from configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use edi_inbound::adapters::build_pipeline;
//! use edi_inbound::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("edi-inbound.toml")?;
//! let pipeline = build_pipeline(&config)?;
//! # Ok(())
//! # }
//! ```

pub mod counter;
pub mod delivery;
pub mod factory;
pub mod guides;
pub mod ledger;
pub mod partnership;
pub mod storage;
pub mod traits;
pub mod x12;

pub use factory::{build_pipeline, create_counter_service, create_ledger, create_object_store};
