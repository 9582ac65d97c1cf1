//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// EDI inbound processing pipeline
#[derive(Parser, Debug)]
#[command(name = "edi-inbound")]
#[command(version, about, long_about = None)]
#[command(author = "EDI Inbound Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "edi-inbound.toml", env = "EDI_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EDI_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process one notification event
    Process(commands::process::ProcessArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show recorded executions
    Status(commands::status::StatusArgs),

    /// Issue the next control number for a key
    ControlNumber(commands::control_number::ControlNumberArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
