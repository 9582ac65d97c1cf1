//! Configuration management
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `EDI_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use edi_inbound::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("edi-inbound.toml")?;
//!
//! println!("Buckets: {}", config.storage.root_path);
//! println!("Acknowledgments enabled: {}", config.acknowledgments.enabled);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! function_name = "edi-inbound"
//! log_level = "info"
//!
//! [storage]
//! root_path = "/var/lib/edi-inbound/buckets"
//!
//! [partnerships]
//! path = "/etc/edi-inbound/partnerships"
//!
//! [partners]
//! ACMEISA = "acme"
//! MYISAID = "this-is-me"
//!
//! [[guides]]
//! id = "01GUIDE850"
//! transaction_set = "850"
//!
//! [delivery]
//! timeout_seconds = 30
//! webhook_api_key = "${EDI_WEBHOOK_API_KEY}"
//!
//! [ledger]
//! path = "/var/lib/edi-inbound/executions"
//!
//! [control_numbers]
//! path = "/var/lib/edi-inbound/control-numbers.json"
//!
//! [acknowledgments]
//! enabled = true
//! outbound_prefix = "outbound"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    AcknowledgmentsConfig, ApplicationConfig, ControlNumbersConfig, DeliveryConfig, EdiConfig,
    GuideConfig, LedgerConfig, LoggingConfig, PartnershipsConfig, StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
