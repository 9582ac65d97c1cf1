//! Status command implementation
//!
//! Lists recorded executions from the ledger, newest first.

use crate::adapters::create_ledger;
use crate::config::load_config;
use crate::core::execution::ExecutionStatus;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show executions with this status (new, successful, failed)
    #[arg(long)]
    pub status: Option<ExecutionStatus>,

    /// Maximum number of executions to show
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(status = ?self.status, "Checking execution status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let ledger = create_ledger(&config);
        let records = match ledger.list(self.status).await {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to read execution ledger");
                println!("   Error: {}", e);
                return Ok(5);
            }
        };

        if records.is_empty() {
            println!("No executions found.");
            return Ok(0);
        }

        println!("📊 Executions ({} found)", records.len());
        println!();
        println!(
            "{:<34} {:<12} {:<9} {:<21} {:<10}",
            "Execution ID", "Status", "Attempts", "Started", "Duration"
        );
        println!("{}", "-".repeat(90));

        for record in records.iter().take(self.limit) {
            let duration = record
                .duration()
                .map(|d| format!("{}ms", d.num_milliseconds()))
                .unwrap_or_else(|| "-".to_string());

            println!(
                "{:<34} {:<12} {:<9} {:<21} {:<10}",
                record.execution_id.as_str(),
                record.status.to_string(),
                record.attempts,
                record.started_at.format("%Y-%m-%d %H:%M:%S"),
                duration
            );

            if let Some(failure) = &record.failure {
                println!("    ↳ {}", failure.message);
            }
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: StatusArgs,
    }

    #[test]
    fn test_status_filter_parses() {
        let harness = Harness::parse_from(["status", "--status", "failed"]);
        assert_eq!(harness.args.status, Some(ExecutionStatus::Failed));
        assert_eq!(harness.args.limit, 20);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(Harness::try_parse_from(["status", "--status", "pending"]).is_err());
    }
}
