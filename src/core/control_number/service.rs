//! Keyed counter service
//!
//! Issues fixed-width, zero-padded numbers from a counter per composite key.
//! Atomicity per key is provided by the [`CounterStore`].

use crate::adapters::traits::CounterStore;
use crate::domain::errors::CounterError;
use crate::domain::ids::PartnerId;
use crate::domain::partnership::UsageIndicatorCode;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Width of an issued control number
pub const CONTROL_NUMBER_WIDTH: usize = 9;

/// Largest value that fits in [`CONTROL_NUMBER_WIDTH`] digits
pub const MAX_CONTROL_NUMBER: u64 = 999_999_999;

/// Envelope segment a control number is issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlSegment {
    #[serde(rename = "ISA")]
    Isa,
    #[serde(rename = "GS")]
    Gs,
}

impl ControlSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isa => "ISA",
            Self::Gs => "GS",
        }
    }
}

impl fmt::Display for ControlSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ControlSegment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ISA" => Ok(Self::Isa),
            "GS" => Ok(Self::Gs),
            other => Err(format!("unknown segment '{other}', expected ISA or GS")),
        }
    }
}

/// Composite key for control number counters
///
/// Renders as `usage|segment|sending|receiving`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlNumberKey {
    pub usage_indicator_code: UsageIndicatorCode,
    pub segment: ControlSegment,
    pub sending_partner_id: PartnerId,
    pub receiving_partner_id: PartnerId,
}

impl ControlNumberKey {
    pub fn new(
        usage_indicator_code: UsageIndicatorCode,
        segment: ControlSegment,
        sending_partner_id: PartnerId,
        receiving_partner_id: PartnerId,
    ) -> Self {
        Self {
            usage_indicator_code,
            segment,
            sending_partner_id,
            receiving_partner_id,
        }
    }
}

impl fmt::Display for ControlNumberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.usage_indicator_code,
            self.segment,
            self.sending_partner_id,
            self.receiving_partner_id
        )
    }
}

/// Issues padded counter values for opaque composite keys
#[derive(Clone)]
pub struct KeyedCounterService {
    store: Arc<dyn CounterStore + Send + Sync>,
}

impl KeyedCounterService {
    pub fn new(store: Arc<dyn CounterStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Increments the counter for `composite_key` and returns the new value
    ///
    /// # Arguments
    ///
    /// * `composite_key` - Opaque key, passed to the store unchanged
    /// * `amount` - Increment, at least 1
    ///
    /// # Errors
    ///
    /// Returns [`CounterError::InvalidAmount`] for a zero amount,
    /// [`CounterError::Issuance`] if the store yields no value and
    /// [`CounterError::Overflow`] if the value no longer fits the width.
    pub async fn increment(&self, composite_key: &str, amount: u64) -> Result<String> {
        if amount == 0 {
            return Err(CounterError::InvalidAmount.into());
        }

        let value = self
            .store
            .increment(composite_key, amount)
            .await?
            .ok_or_else(|| CounterError::Issuance(composite_key.to_string()))?;

        if value > MAX_CONTROL_NUMBER {
            return Err(CounterError::Overflow {
                key: composite_key.to_string(),
                value,
                width: CONTROL_NUMBER_WIDTH,
            }
            .into());
        }

        let control_number = format!("{value:0width$}", width = CONTROL_NUMBER_WIDTH);
        tracing::debug!(key = %composite_key, control_number = %control_number, "Generated control number");

        Ok(control_number)
    }

    /// Issues the next control number for an envelope key
    pub async fn generate(&self, key: &ControlNumberKey, amount: u64) -> Result<String> {
        self.increment(&key.to_string(), amount).await
    }
}

impl fmt::Debug for KeyedCounterService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCounterService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::counter::InMemoryCounterStore;
    use crate::domain::EdiError;
    use async_trait::async_trait;

    struct EmptyStore;

    #[async_trait]
    impl CounterStore for EmptyStore {
        async fn increment(&self, _key: &str, _amount: u64) -> Result<Option<u64>> {
            Ok(None)
        }
    }

    fn service() -> KeyedCounterService {
        KeyedCounterService::new(Arc::new(InMemoryCounterStore::new()))
    }

    fn key(segment: ControlSegment) -> ControlNumberKey {
        ControlNumberKey::new(
            UsageIndicatorCode::T,
            segment,
            PartnerId::new("this-is-me").unwrap(),
            PartnerId::new("acme").unwrap(),
        )
    }

    #[test]
    fn test_key_format() {
        assert_eq!(key(ControlSegment::Isa).to_string(), "T|ISA|this-is-me|acme");
        assert_eq!(key(ControlSegment::Gs).to_string(), "T|GS|this-is-me|acme");
    }

    #[test]
    fn test_segment_parse() {
        assert_eq!("isa".parse::<ControlSegment>().unwrap(), ControlSegment::Isa);
        assert!("ST".parse::<ControlSegment>().is_err());
    }

    #[tokio::test]
    async fn test_sequential_increments_are_consecutive_and_padded() {
        let service = service();
        let mut issued = Vec::new();
        for _ in 0..42 {
            issued.push(service.increment("k", 1).await.unwrap());
        }

        for (i, number) in issued.iter().enumerate() {
            assert_eq!(number.len(), CONTROL_NUMBER_WIDTH);
            assert_eq!(number.parse::<u64>().unwrap(), i as u64 + 1);
        }
        assert_eq!(issued.last().map(String::as_str), Some("000000042"));
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_interfere() {
        let service = service();
        service.generate(&key(ControlSegment::Isa), 1).await.unwrap();
        service.generate(&key(ControlSegment::Isa), 1).await.unwrap();

        let gs = service.generate(&key(ControlSegment::Gs), 1).await.unwrap();
        let isa = service.generate(&key(ControlSegment::Isa), 1).await.unwrap();
        assert_eq!(gs, "000000001");
        assert_eq!(isa, "000000003");
    }

    #[tokio::test]
    async fn test_amount() {
        let service = service();
        assert_eq!(service.increment("k", 5).await.unwrap(), "000000005");

        let err = service.increment("k", 0).await.unwrap_err();
        assert!(matches!(err, EdiError::Counter(CounterError::InvalidAmount)));
    }

    #[tokio::test]
    async fn test_missing_value_is_issuance_error() {
        let service = KeyedCounterService::new(Arc::new(EmptyStore));
        let err = service.increment("T|ISA|a|b", 1).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Counter error: Issue generating control number with key: T|ISA|a|b"
        );
    }

    #[tokio::test]
    async fn test_overflow() {
        let service = service();
        service.increment("k", MAX_CONTROL_NUMBER).await.unwrap();
        let err = service.increment("k", 1).await.unwrap_err();
        assert!(matches!(
            err,
            EdiError::Counter(CounterError::Overflow { value: 1_000_000_000, .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_unique() {
        let service = service();
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.increment("shared", 1).await.unwrap() })
            })
            .collect();

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap());
        }
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), 20);
    }
}
