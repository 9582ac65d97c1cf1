//! Core processing logic.
//!
//! # Modules
//!
//! - [`classify`] - Splits notification records into keys to process and ignored keys
//! - [`routing`] - Transaction set resolution over partnership configuration
//! - [`control_number`] - Keyed counter service for envelope control numbers
//! - [`execution`] - Execution ids and ledger records
//! - [`ack`] - 997 functional acknowledgments
//! - [`pipeline`] - The orchestrator tying the above to external collaborators
//!
//! # Processing Workflow
//!
//! 1. **Record**: Derive the execution id and record a new execution
//! 2. **Classify**: Keep objects directly inside an `inbound` directory
//! 3. **Split**: Fetch each object and split it into one document per functional group
//! 4. **Route**: Resolve partners, load the partnership and select transaction set entries
//! 5. **Deliver**: Transform each document per destination and deliver it
//! 6. **Acknowledge** (optional): Store a 997 for each processed group
//! 7. **Clean up**: Delete the source object and report results

pub mod ack;
pub mod classify;
pub mod control_number;
pub mod execution;
pub mod pipeline;
pub mod routing;
