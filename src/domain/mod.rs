//! Domain models and types for the inbound pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PartnerId`], [`GuideId`], [`MappingId`], [`ExecutionId`])
//! - **Notification events** ([`NotificationEvent`], [`NotificationRecord`])
//! - **Documents** ([`EdiDocument`])
//! - **Partnership routing** ([`Partnership`], [`TransactionSetConfig`], [`Destination`])
//! - **Error types** ([`EdiError`] and the collaborator-specific enums)
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EdiError>`]:
//!
//! ```rust,no_run
//! use edi_inbound::domain::{EdiError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = edi_inbound::config::load_config("edi-inbound.toml")?;
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod errors;
pub mod event;
pub mod ids;
pub mod partnership;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{DocumentMetadata, EdiDocument, Envelope, Separators};
pub use errors::{
    CounterError, DeliveryError, EdiError, ErrorDetail, GuideError, LedgerError,
    PartnershipError, RoutingError, SplitError, StorageError,
};
pub use event::{EventType, NotificationEvent, NotificationRecord};
pub use ids::{ExecutionId, GuideId, MappingId, PartnerId};
pub use partnership::{
    Destination, DestinationTarget, GuideBinding, GuideSummary, PartnerScope, Partnership,
    TransactionSetConfig, UsageIndicatorCode,
};
pub use result::Result;
