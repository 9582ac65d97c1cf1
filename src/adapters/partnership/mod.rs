//! Partner and partnership lookups

pub mod file;
pub mod resolver;

pub use file::FilePartnershipStore;
pub use resolver::ConfigPartnerResolver;
