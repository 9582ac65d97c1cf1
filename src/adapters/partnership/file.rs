//! Partnership documents stored as JSON files
//!
//! Layout: `<root>/<sendingPartnerId>_<receivingPartnerId>.json`.

use crate::adapters::traits::PartnershipStore;
use crate::domain::errors::PartnershipError;
use crate::domain::ids::PartnerId;
use crate::domain::partnership::Partnership;
use crate::domain::{EdiError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Loads partnerships from a directory of JSON documents
#[derive(Debug, Clone)]
pub struct FilePartnershipStore {
    root: PathBuf,
}

impl FilePartnershipStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File holding the partnership for a partner pair
    pub fn partnership_path(
        &self,
        sending_partner_id: &PartnerId,
        receiving_partner_id: &PartnerId,
    ) -> Result<PathBuf> {
        for id in [sending_partner_id, receiving_partner_id] {
            if id.as_str().contains(['/', '\\']) || id.as_str().contains("..") {
                return Err(PartnershipError::LoadFailed(format!(
                    "partner id '{id}' cannot be used in a file name"
                ))
                .into());
            }
        }

        Ok(self
            .root
            .join(format!("{sending_partner_id}_{receiving_partner_id}.json")))
    }
}

#[async_trait]
impl PartnershipStore for FilePartnershipStore {
    async fn load(
        &self,
        sending_partner_id: &PartnerId,
        receiving_partner_id: &PartnerId,
    ) -> Result<Partnership> {
        let path = self.partnership_path(sending_partner_id, receiving_partner_id)?;

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PartnershipError::NotFound {
                    sending_partner_id: sending_partner_id.to_string(),
                    receiving_partner_id: receiving_partner_id.to_string(),
                }
            } else {
                PartnershipError::LoadFailed(format!("{}: {e}", path.display()))
            }
        })?;

        let partnership = Partnership::from_json(&bytes).map_err(|e| match e {
            EdiError::Serialization(message) => {
                PartnershipError::LoadFailed(format!("{}: {message}", path.display())).into()
            }
            other => other,
        })?;

        tracing::debug!(
            sending_partner_id = %sending_partner_id,
            receiving_partner_id = %receiving_partner_id,
            transaction_sets = partnership.transaction_sets.len(),
            "Loaded partnership"
        );

        Ok(partnership)
    }
}
