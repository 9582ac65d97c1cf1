//! In-memory counter store

use crate::adapters::traits::CounterStore;
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Counter store that lives for the life of the process
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    counters: Mutex<HashMap<String, u64>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter, if it has been incremented
    pub async fn current(&self, key: &str) -> Option<u64> {
        self.counters.lock().await.get(key).copied()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn increment(&self, key: &str, amount: u64) -> Result<Option<u64>> {
        let mut counters = self.counters.lock().await;
        let value = counters.entry(key.to_string()).or_insert(0);
        *value = value.saturating_add(amount);
        Ok(Some(*value))
    }
}
