//! CLI command implementations

pub mod control_number;
pub mod init;
pub mod process;
pub mod status;
pub mod validate;
