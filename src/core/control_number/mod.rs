//! Control number issuance
//!
//! Envelope control numbers are drawn from a [`KeyedCounterService`] keyed by
//! usage indicator, segment and partner pair.

pub mod service;

pub use service::{
    ControlNumberKey, ControlSegment, KeyedCounterService, CONTROL_NUMBER_WIDTH,
    MAX_CONTROL_NUMBER,
};
