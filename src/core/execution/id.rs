//! Execution id derivation
//!
//! The id is a digest over the function name and the canonical form of the
//! input event, so a redelivered event maps to the same ledger entry.

use crate::domain::ids::ExecutionId;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Number of hex characters kept from the digest
pub const EXECUTION_ID_LENGTH: usize = 32;

/// Derives the execution id for an invocation
///
/// # Examples
///
/// ```
/// use edi_inbound::core::execution::generate_execution_id;
/// use serde_json::json;
///
/// let a = generate_execution_id("edi-inbound", &json!({"Records": [], "x": 1}));
/// let b = generate_execution_id("edi-inbound", &json!({"x": 1, "Records": []}));
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 32);
/// ```
pub fn generate_execution_id(function_name: &str, event: &Value) -> ExecutionId {
    let canonical = canonicalize(event);

    let mut hasher = Sha256::new();
    hasher.update(function_name.as_bytes());
    hasher.update(canonical.to_string().as_bytes());
    let digest = format!("{:x}", hasher.finalize());

    ExecutionId::from_digest(digest[..EXECUTION_ID_LENGTH].to_string())
}

/// Recursively sorts object keys
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        _ => value.clone(),
    }
}
