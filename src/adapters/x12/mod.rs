//! X12 splitting and translation

pub mod segments;
pub mod splitter;
pub mod translator;

pub use splitter::{split_interchanges, X12Splitter};
pub use translator::X12Translator;
