//! Process command implementation
//!
//! Runs one notification event through the pipeline and prints the outcome
//! as JSON.

use crate::adapters::build_pipeline;
use crate::config::load_config;
use crate::core::pipeline::InvocationOutcome;
use clap::Args;
use serde_json::Value;
use tokio::io::AsyncReadExt;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Notification event JSON file, or `-` for stdin
    #[arg(short, long)]
    pub event: String,
}

impl ProcessArgs {
    /// Execute the process command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration file");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        let pipeline = match build_pipeline(&config) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ Failed to set up collaborators");
                eprintln!("   Error: {e}");
                return Ok(4);
            }
        };

        let event = self.read_event().await?;
        tracing::info!(source = %self.event, "Processing notification event");

        let outcome = pipeline.handle(event).await;
        println!("{}", serde_json::to_string_pretty(&outcome)?);

        Ok(exit_code(&outcome))
    }

    async fn read_event(&self) -> anyhow::Result<Value> {
        let raw = if self.event == "-" {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        } else {
            tokio::fs::read_to_string(&self.event).await?
        };

        Ok(serde_json::from_str(&raw)?)
    }
}

/// Exit code for an invocation outcome
pub fn exit_code(outcome: &InvocationOutcome) -> i32 {
    match outcome {
        InvocationOutcome::Succeeded(_) => 0,
        InvocationOutcome::PartiallyFailed { .. } => 1,
        InvocationOutcome::Failed(_) => 5,
    }
}
