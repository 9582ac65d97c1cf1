//! Configuration schema types

use crate::config::SecretString;
use crate::domain::ids::{GuideId, PartnerId};
use crate::domain::partnership::GuideSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdiConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Object storage root
    pub storage: StorageConfig,

    /// Partnership documents
    pub partnerships: PartnershipsConfig,

    /// Interchange id to partner id table
    #[serde(default)]
    pub partners: BTreeMap<String, String>,

    /// Guide catalog
    #[serde(default)]
    pub guides: Vec<GuideConfig>,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Execution ledger
    pub ledger: LedgerConfig,

    /// Control number counters
    pub control_numbers: ControlNumbersConfig,

    /// 997 acknowledgments
    #[serde(default)]
    pub acknowledgments: AcknowledgmentsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EdiConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.partnerships.validate()?;

        for (interchange_id, partner_id) in &self.partners {
            if interchange_id.trim().is_empty() {
                return Err("partners keys cannot be empty".to_string());
            }
            if partner_id.trim().is_empty() {
                return Err(format!(
                    "partners.{interchange_id} must map to a non-empty partner id"
                ));
            }
        }

        for guide in &self.guides {
            guide.validate()?;
        }

        self.delivery.validate()?;
        self.ledger.validate()?;
        self.control_numbers.validate()?;
        self.acknowledgments.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Partner table as typed ids
    pub fn partner_entries(&self) -> Result<Vec<(String, PartnerId)>, String> {
        self.partners
            .iter()
            .map(|(interchange_id, partner_id)| {
                Ok((interchange_id.clone(), PartnerId::new(partner_id.trim())?))
            })
            .collect()
    }

    /// Guide catalog as summaries
    pub fn guide_catalog(&self) -> Result<Vec<GuideSummary>, String> {
        self.guides.iter().map(GuideConfig::to_summary).collect()
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Name mixed into execution ids
    #[serde(default = "default_function_name")]
    pub function_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.function_name.trim().is_empty() {
            return Err("application.function_name cannot be empty".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            function_name: default_function_name(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one subdirectory per bucket
    pub root_path: String,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root_path.trim().is_empty() {
            return Err("storage.root_path cannot be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnershipsConfig {
    /// Directory of `<sending>_<receiving>.json` documents
    pub path: String,
}

impl PartnershipsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("partnerships.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// One guide catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    pub id: String,

    /// Transaction set the guide maps, e.g. `850`
    pub transaction_set: String,

    #[serde(default)]
    pub name: Option<String>,
}

impl GuideConfig {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("guides.id cannot be empty".to_string());
        }
        if self.transaction_set.trim().is_empty() {
            return Err(format!(
                "guides.transaction_set cannot be empty for guide '{}'",
                self.id
            ));
        }
        Ok(())
    }

    pub fn to_summary(&self) -> Result<GuideSummary, String> {
        Ok(GuideSummary {
            guide_id: GuideId::new(self.id.trim())?,
            transaction_set: self.transaction_set.trim().to_string(),
            name: self.name.clone(),
        })
    }
}

/// Destination delivery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Webhook request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Sent as `Authorization: Key <value>` on webhook requests
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub webhook_api_key: Option<SecretString>,
}

impl DeliveryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err("delivery.timeout_seconds must be between 1 and 300".to_string());
        }
        if let Some(key) = &self.webhook_api_key {
            use secrecy::ExposeSecret;
            if key.expose_secret().is_empty() {
                return Err("delivery.webhook_api_key cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            webhook_api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory of `<execution_id>.json` records
    pub path: String,

    /// Attempts after which an execution is treated as looping
    #[serde(default = "default_loop_detection_threshold")]
    pub loop_detection_threshold: u32,
}

impl LedgerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("ledger.path cannot be empty".to_string());
        }
        if self.loop_detection_threshold == 0 {
            return Err("ledger.loop_detection_threshold must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlNumbersConfig {
    /// JSON file holding every counter
    pub path: String,
}

impl ControlNumbersConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("control_numbers.path cannot be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcknowledgmentsConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Key prefix for generated 997s inside the source bucket
    #[serde(default = "default_outbound_prefix")]
    pub outbound_prefix: String,
}

impl AcknowledgmentsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.outbound_prefix.trim_matches('/').is_empty() {
            return Err(
                "acknowledgments.outbound_prefix cannot be empty when acknowledgments are enabled"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Default for AcknowledgmentsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            outbound_prefix: default_outbound_prefix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

// Default value functions
fn default_function_name() -> String {
    "edi-inbound".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_loop_detection_threshold() -> u32 {
    5
}

fn default_outbound_prefix() -> String {
    "outbound".to_string()
}

fn default_local_path() -> String {
    "/var/log/edi-inbound".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}
