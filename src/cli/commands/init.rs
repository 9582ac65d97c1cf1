//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "edi-inbound.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your paths and partner ids", self.output);
                println!("  2. Set EDI_WEBHOOK_API_KEY if webhooks need a key");
                println!("  3. Validate configuration: edi-inbound validate-config");
                println!("  4. Process an event: edi-inbound process --event event.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }
}

/// Sample configuration written by `init`
pub fn sample_config() -> &'static str {
    r#"# EDI inbound configuration

[application]
function_name = "edi-inbound"
log_level = "info"

[storage]
# Each bucket is a directory under this root
root_path = "/var/lib/edi-inbound/buckets"

[partnerships]
# Holds <sending>_<receiving>.json documents
path = "/etc/edi-inbound/partnerships"

# Interchange id (ISA06/ISA08) -> partner id
[partners]
ACMEISA = "acme"
MYISAID = "this-is-me"

[[guides]]
id = "01GUIDE850"
transaction_set = "850"
name = "Purchase order"

[delivery]
timeout_seconds = 30
# webhook_api_key = "${EDI_WEBHOOK_API_KEY}"

[ledger]
path = "/var/lib/edi-inbound/executions"
loop_detection_threshold = 5

[control_numbers]
path = "/var/lib/edi-inbound/control-numbers.json"

[acknowledgments]
enabled = false
outbound_prefix = "outbound"

[logging]
local_enabled = true
local_path = "/var/log/edi-inbound"
local_rotation = "daily"
local_max_size_mb = 100
"#
}
