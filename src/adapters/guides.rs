//! Guide catalog
//!
//! Resolves mapping guides from the configured `[[guides]]` list.

use crate::adapters::traits::GuideResolver;
use crate::domain::errors::GuideError;
use crate::domain::ids::GuideId;
use crate::domain::partnership::GuideSummary;
use crate::domain::Result;
use async_trait::async_trait;

/// Guide resolver over a static catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogGuideResolver {
    guides: Vec<GuideSummary>,
}

impl CatalogGuideResolver {
    pub fn new(guides: Vec<GuideSummary>) -> Self {
        Self { guides }
    }

    pub fn guides(&self) -> &[GuideSummary] {
        &self.guides
    }
}

#[async_trait]
impl GuideResolver for CatalogGuideResolver {
    /// Returns the first candidate, in candidate order, whose catalog entry
    /// handles the transaction set
    async fn resolve(
        &self,
        candidates: &[GuideId],
        transaction_set: &str,
    ) -> Result<GuideSummary> {
        candidates
            .iter()
            .find_map(|candidate| {
                self.guides.iter().find(|guide| {
                    &guide.guide_id == candidate && guide.transaction_set == transaction_set
                })
            })
            .cloned()
            .ok_or_else(|| {
                GuideError::NoMatch {
                    transaction_set: transaction_set.to_string(),
                    candidates: candidates.len(),
                }
                .into()
            })
    }
}
