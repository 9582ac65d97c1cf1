//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::EdiConfig;
use crate::config::secret_string;
use crate::domain::errors::EdiError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into EdiConfig
/// 4. Applies environment variable overrides (EDI_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use edi_inbound::config::loader::load_config;
///
/// let config = load_config("edi-inbound.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EdiConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EdiError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EdiError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<EdiConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: EdiConfig = toml::from_str(&contents)
        .map_err(|e| EdiError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        EdiError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| EdiError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EdiError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using EDI_* prefix
///
/// Environment variables follow the pattern: EDI_<SECTION>_<KEY>
/// For example: EDI_STORAGE_ROOT_PATH, EDI_ACKNOWLEDGMENTS_ENABLED
fn apply_env_overrides(config: &mut EdiConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("EDI_APPLICATION_FUNCTION_NAME") {
        config.application.function_name = val;
    }
    if let Ok(val) = std::env::var("EDI_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("EDI_STORAGE_ROOT_PATH") {
        config.storage.root_path = val;
    }
    if let Ok(val) = std::env::var("EDI_PARTNERSHIPS_PATH") {
        config.partnerships.path = val;
    }

    // Delivery overrides
    if let Ok(val) = std::env::var("EDI_DELIVERY_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.delivery.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("EDI_DELIVERY_WEBHOOK_API_KEY") {
        config.delivery.webhook_api_key = Some(secret_string(val));
    }

    // Ledger overrides
    if let Ok(val) = std::env::var("EDI_LEDGER_PATH") {
        config.ledger.path = val;
    }
    if let Ok(val) = std::env::var("EDI_LEDGER_LOOP_DETECTION_THRESHOLD") {
        if let Ok(threshold) = val.parse() {
            config.ledger.loop_detection_threshold = threshold;
        }
    }

    if let Ok(val) = std::env::var("EDI_CONTROL_NUMBERS_PATH") {
        config.control_numbers.path = val;
    }

    // Acknowledgment overrides
    if let Ok(val) = std::env::var("EDI_ACKNOWLEDGMENTS_ENABLED") {
        config.acknowledgments.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("EDI_ACKNOWLEDGMENTS_OUTBOUND_PREFIX") {
        config.acknowledgments.outbound_prefix = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("EDI_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("EDI_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
