//! Partner profile lookup by interchange id

use crate::adapters::traits::PartnerResolver;
use crate::domain::errors::PartnershipError;
use crate::domain::ids::PartnerId;
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Resolves partner ids from a static interchange id table
///
/// ISA ids are fixed-width and space padded, so lookups ignore surrounding
/// whitespace.
#[derive(Debug, Clone, Default)]
pub struct ConfigPartnerResolver {
    profiles: HashMap<String, PartnerId>,
}

impl ConfigPartnerResolver {
    pub fn new(profiles: impl IntoIterator<Item = (String, PartnerId)>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|(interchange_id, partner_id)| {
                    (interchange_id.trim().to_string(), partner_id)
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl PartnerResolver for ConfigPartnerResolver {
    async fn resolve(&self, interchange_id: &str) -> Result<PartnerId> {
        let trimmed = interchange_id.trim();
        self.profiles
            .get(trimmed)
            .cloned()
            .ok_or_else(|| PartnershipError::UnknownPartner(trimmed.to_string()).into())
    }
}
