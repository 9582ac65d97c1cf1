//! Control number command implementation
//!
//! Issues the next control number for a usage/segment/partner key.

use crate::adapters::create_counter_service;
use crate::config::load_config;
use crate::core::control_number::{ControlNumberKey, ControlSegment};
use crate::domain::ids::PartnerId;
use crate::domain::partnership::UsageIndicatorCode;
use clap::Args;

/// Arguments for the control-number command
#[derive(Args, Debug)]
pub struct ControlNumberArgs {
    /// Usage indicator (P, T, I)
    #[arg(long)]
    pub usage: UsageIndicatorCode,

    /// Envelope segment (ISA, GS)
    #[arg(long)]
    pub segment: ControlSegment,

    /// Sending partner id
    #[arg(long)]
    pub sender: String,

    /// Receiving partner id
    #[arg(long)]
    pub receiver: String,

    /// How many numbers to reserve; the last one is printed
    #[arg(long, default_value_t = 1)]
    pub amount: u64,
}

impl ControlNumberArgs {
    /// Execute the control-number command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration file");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        let key = match self.key() {
            Ok(k) => k,
            Err(e) => {
                eprintln!("❌ Invalid partner id: {e}");
                return Ok(2);
            }
        };

        let counters = create_counter_service(&config);
        match counters.generate(&key, self.amount).await {
            Ok(number) => {
                tracing::info!(key = %key, number = %number, "Issued control number");
                println!("{number}");
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Failed to issue control number");
                eprintln!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn key(&self) -> Result<ControlNumberKey, String> {
        Ok(ControlNumberKey::new(
            self.usage,
            self.segment,
            PartnerId::new(self.sender.trim())?,
            PartnerId::new(self.receiver.trim())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ControlNumberArgs,
    }

    #[test]
    fn test_key_from_args() {
        let harness = Harness::parse_from([
            "control-number",
            "--usage",
            "t",
            "--segment",
            "gs",
            "--sender",
            "me",
            "--receiver",
            "acme",
        ]);
        assert_eq!(harness.args.amount, 1);
        assert_eq!(harness.args.key().unwrap().to_string(), "T|GS|me|acme");
    }

    #[test]
    fn test_blank_partner_rejected() {
        let harness = Harness::parse_from([
            "control-number",
            "--usage",
            "P",
            "--segment",
            "ISA",
            "--sender",
            " ",
            "--receiver",
            "acme",
        ]);
        assert!(harness.args.key().is_err());
    }
}
