//! Functional acknowledgments
//!
//! When a partnership carries an ack routing entry, each processed functional
//! group is answered with a 997 written to the outbound area of the source
//! bucket. Control numbers come from the keyed counter service, keyed in the
//! outbound direction (we are the sender).

pub mod functional;

pub use functional::{render_functional_ack, AckControl};

use crate::adapters::traits::ObjectStore;
use crate::core::control_number::{ControlNumberKey, ControlSegment, KeyedCounterService};
use crate::core::routing::AckTransactionSet;
use crate::domain::document::EdiDocument;
use crate::domain::ids::PartnerId;
use crate::domain::partnership::UsageIndicatorCode;
use crate::domain::{EdiError, Result};
use chrono::Utc;
use std::sync::Arc;

/// Issues and stores 997 acknowledgments
pub struct FunctionalAcknowledger {
    counters: KeyedCounterService,
    object_store: Arc<dyn ObjectStore + Send + Sync>,
    outbound_prefix: String,
}

impl FunctionalAcknowledger {
    pub fn new(
        counters: KeyedCounterService,
        object_store: Arc<dyn ObjectStore + Send + Sync>,
        outbound_prefix: impl Into<String>,
    ) -> Self {
        Self {
            counters,
            object_store,
            outbound_prefix: outbound_prefix.into(),
        }
    }

    /// Acknowledges one inbound document and returns the stored object key
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket the inbound document came from
    /// * `document` - Document to acknowledge, with envelope headers
    /// * `ack` - The partnership's ack routing entry
    /// * `sending_partner_id` - Partner that sent the inbound document
    /// * `receiving_partner_id` - Partner that received it
    ///
    /// # Errors
    ///
    /// Returns [`EdiError::Acknowledgment`] if the document has no envelope or
    /// no usable usage indicator, and propagates counter and storage errors.
    pub async fn acknowledge(
        &self,
        bucket: &str,
        document: &EdiDocument,
        ack: &AckTransactionSet,
        sending_partner_id: &PartnerId,
        receiving_partner_id: &PartnerId,
    ) -> Result<String> {
        let envelope = document.metadata.envelope.as_ref().ok_or_else(|| {
            EdiError::Acknowledgment("document has no envelope headers".to_string())
        })?;

        let usage_indicator_code = match ack.usage_indicator_code {
            Some(code) => code,
            None => envelope
                .interchange
                .usage_indicator
                .parse::<UsageIndicatorCode>()
                .map_err(EdiError::Acknowledgment)?,
        };

        let key_for = |segment| {
            ControlNumberKey::new(
                usage_indicator_code,
                segment,
                receiving_partner_id.clone(),
                sending_partner_id.clone(),
            )
        };
        let interchange_control_number =
            self.counters.generate(&key_for(ControlSegment::Isa), 1).await?;
        let group_control_number = self.counters.generate(&key_for(ControlSegment::Gs), 1).await?;

        let control = AckControl {
            interchange_control_number,
            group_control_number,
            usage_indicator: usage_indicator_code.to_string(),
        };
        let body = render_functional_ack(envelope, &control, Utc::now());

        let key = format!(
            "{}/{}/997-{}.edi",
            self.outbound_prefix.trim_matches('/'),
            sending_partner_id,
            control.interchange_control_number
        );
        self.object_store
            .put(bucket, &key, body.into_bytes())
            .await?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            acknowledged_group = %envelope.group.control_number,
            "Stored functional acknowledgment"
        );

        Ok(key)
    }
}
