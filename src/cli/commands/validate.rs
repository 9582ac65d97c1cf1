//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Function: {}", config.application.function_name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Buckets: {}", config.storage.root_path);
        println!("  Partnerships: {}", config.partnerships.path);
        println!("  Partner Profiles: {}", config.partners.len());
        println!("  Guides: {}", config.guides.len());
        println!(
            "  Webhook API Key: {}",
            if config.delivery.webhook_api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!(
            "  Ledger: {} (loop threshold {})",
            config.ledger.path, config.ledger.loop_detection_threshold
        );
        println!("  Control Numbers: {}", config.control_numbers.path);
        if config.acknowledgments.enabled {
            println!(
                "  Acknowledgments: enabled ({}/)",
                config.acknowledgments.outbound_prefix
            );
        } else {
            println!("  Acknowledgments: disabled");
        }
        println!();
        Ok(0)
    }
}
