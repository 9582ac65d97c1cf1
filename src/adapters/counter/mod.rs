//! Counter stores backing control number issuance

pub mod file;
pub mod memory;

pub use file::FileCounterStore;
pub use memory::InMemoryCounterStore;
