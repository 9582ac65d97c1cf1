//! X12 to JSON translation
//!
//! Produces a structural JSON rendering of each transaction set in a
//! document: segment ids with their elements, composite elements split into
//! arrays. Guide and mapping ids are carried through so downstream consumers
//! know which contract the payload follows.

use crate::adapters::traits::TransformEngine;
use crate::adapters::x12::segments::{read_separators, tokenize, Segment};
use crate::domain::document::Separators;
use crate::domain::ids::{GuideId, MappingId};
use crate::domain::{EdiError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Transform engine producing structural JSON from X12
#[derive(Debug, Clone, Copy, Default)]
pub struct X12Translator;

impl X12Translator {
    pub fn new() -> Self {
        Self
    }

    /// Translates a document without guide context
    pub fn translate(&self, edi: &str) -> Result<Vec<Value>> {
        let separators =
            read_separators(edi).map_err(|e| EdiError::Transform(e.to_string()))?;

        let mut transaction_sets = Vec::new();
        let mut current: Option<(Segment, Vec<Value>)> = None;

        for segment in tokenize(edi, &separators) {
            match segment.id.as_str() {
                "ST" => {
                    if current.is_some() {
                        return Err(EdiError::Transform(
                            "transaction set opened before the previous one closed".to_string(),
                        ));
                    }
                    let rendered = segment_json(&segment, &separators);
                    current = Some((segment, vec![rendered]));
                }
                "SE" => {
                    let Some((st, mut segments)) = current.take() else {
                        return Err(EdiError::Transform(
                            "SE segment without a matching ST".to_string(),
                        ));
                    };
                    segments.push(segment_json(&segment, &separators));
                    transaction_sets.push(json!({
                        "code": st.element(1).unwrap_or_default(),
                        "controlNumber": st.element(2).unwrap_or_default(),
                        "segments": segments,
                    }));
                }
                _ => {
                    if let Some((_, segments)) = current.as_mut() {
                        segments.push(segment_json(&segment, &separators));
                    }
                }
            }
        }

        if current.is_some() {
            return Err(EdiError::Transform(
                "transaction set is missing its SE trailer".to_string(),
            ));
        }
        if transaction_sets.is_empty() {
            return Err(EdiError::Transform(
                "document contains no transaction sets".to_string(),
            ));
        }

        Ok(transaction_sets)
    }
}

fn segment_json(segment: &Segment, separators: &Separators) -> Value {
    let elements: Vec<Value> = segment
        .elements
        .iter()
        .map(|element| {
            if element.contains(separators.component) {
                Value::Array(
                    element
                        .split(separators.component)
                        .map(|component| Value::String(component.to_string()))
                        .collect(),
                )
            } else {
                Value::String(element.clone())
            }
        })
        .collect();

    json!({ "id": segment.id, "elements": elements })
}

#[async_trait]
impl TransformEngine for X12Translator {
    async fn transform(
        &self,
        guide_id: &GuideId,
        edi: &str,
        mapping_id: Option<&MappingId>,
    ) -> Result<Value> {
        let transaction_sets = self.translate(edi)?;
        tracing::debug!(
            guide_id = %guide_id,
            mapping_id = mapping_id.map(MappingId::as_str),
            transaction_sets = transaction_sets.len(),
            "Translated document"
        );

        Ok(json!({
            "guideId": guide_id,
            "mappingId": mapping_id,
            "transactionSets": transaction_sets,
        }))
    }
}
