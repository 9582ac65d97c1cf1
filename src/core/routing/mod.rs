//! Partnership routing resolution
//!
//! Selects which transaction set entries of a partnership apply to a document.

pub mod transaction_sets;

pub use transaction_sets::{
    group_by_guide_binding, select_ack, select_by_guide_id, select_for_partnership,
    AckTransactionSet, GroupedTransactionSets, TransactionSetWithGuideId,
    TransactionSetWithoutGuideId,
};
