//! Transaction set configuration resolution
//!
//! Pure lookups over a partnership's transaction set entries. Every failure is
//! a typed [`RoutingError`]; nothing here panics on malformed data.

use crate::domain::errors::RoutingError;
use crate::domain::ids::{GuideId, PartnerId};
use crate::domain::partnership::{
    Destination, GuideBinding, PartnerScope, TransactionSetConfig, UsageIndicatorCode,
};

/// A transaction set entry bound to a mapping guide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSetWithGuideId {
    pub transaction_set_identifier: Option<String>,
    pub usage_indicator_code: Option<UsageIndicatorCode>,
    pub scope: PartnerScope,
    pub guide_id: GuideId,
    pub destinations: Vec<Destination>,
}

/// A transaction set entry without a mapping guide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSetWithoutGuideId {
    pub transaction_set_identifier: Option<String>,
    pub usage_indicator_code: Option<UsageIndicatorCode>,
    pub scope: PartnerScope,
}

/// The acknowledgment routing entry of a partnership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckTransactionSet {
    pub transaction_set_identifier: Option<String>,
    pub usage_indicator_code: Option<UsageIndicatorCode>,
}

/// Entries partitioned by guide binding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedTransactionSets {
    pub without_guide_id: Vec<TransactionSetWithoutGuideId>,
    pub with_guide_id: Vec<TransactionSetWithGuideId>,
}

impl GroupedTransactionSets {
    /// Guide ids of the guide-bound entries, in configuration order
    pub fn guide_ids(&self) -> Vec<GuideId> {
        self.with_guide_id
            .iter()
            .map(|config| config.guide_id.clone())
            .collect()
    }
}

/// Selects the entries that apply to a sending/receiving partner pair
///
/// Ack entries always apply (their partners are inferred from the interchange
/// being acknowledged); partner-scoped entries apply on an exact pair match.
///
/// # Errors
///
/// Returns [`RoutingError::NoMatchingConfiguration`] when nothing applies.
pub fn select_for_partnership(
    configs: &[TransactionSetConfig],
    sending_partner_id: &PartnerId,
    receiving_partner_id: &PartnerId,
) -> Result<Vec<TransactionSetConfig>, RoutingError> {
    let selected: Vec<TransactionSetConfig> = configs
        .iter()
        .filter(|config| match &config.scope {
            PartnerScope::Ack => true,
            PartnerScope::Partners {
                sending_partner_id: sending,
                receiving_partner_id: receiving,
            } => sending == sending_partner_id && receiving == receiving_partner_id,
        })
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(RoutingError::NoMatchingConfiguration {
            sending_partner_id: sending_partner_id.to_string(),
            receiving_partner_id: receiving_partner_id.to_string(),
        });
    }

    Ok(selected)
}

/// Finds the guide-bound entry for a guide id
///
/// # Errors
///
/// Returns [`RoutingError::NoMatchingGuide`] when no entry carries the guide.
pub fn select_by_guide_id<'a>(
    configs: &'a [TransactionSetWithGuideId],
    guide_id: &GuideId,
) -> Result<&'a TransactionSetWithGuideId, RoutingError> {
    configs
        .iter()
        .find(|config| &config.guide_id == guide_id)
        .ok_or_else(|| RoutingError::NoMatchingGuide(guide_id.to_string()))
}

/// Partitions entries by guide binding
pub fn group_by_guide_binding(configs: &[TransactionSetConfig]) -> GroupedTransactionSets {
    let mut grouped = GroupedTransactionSets::default();

    for config in configs {
        match &config.binding {
            GuideBinding::WithGuideId {
                guide_id,
                destinations,
            } => grouped.with_guide_id.push(TransactionSetWithGuideId {
                transaction_set_identifier: config.transaction_set_identifier.clone(),
                usage_indicator_code: config.usage_indicator_code,
                scope: config.scope.clone(),
                guide_id: guide_id.clone(),
                destinations: destinations.clone(),
            }),
            GuideBinding::WithoutGuideId => {
                grouped.without_guide_id.push(TransactionSetWithoutGuideId {
                    transaction_set_identifier: config.transaction_set_identifier.clone(),
                    usage_indicator_code: config.usage_indicator_code,
                    scope: config.scope.clone(),
                })
            }
        }
    }

    grouped
}

/// Selects the single ack entry among guide-less entries
///
/// # Errors
///
/// Returns [`RoutingError::AckConfigCardinality`] unless exactly one ack entry exists.
pub fn select_ack(
    configs: &[TransactionSetWithoutGuideId],
) -> Result<AckTransactionSet, RoutingError> {
    let acks: Vec<&TransactionSetWithoutGuideId> = configs
        .iter()
        .filter(|config| matches!(config.scope, PartnerScope::Ack))
        .collect();

    match acks.as_slice() {
        [ack] => Ok(AckTransactionSet {
            transaction_set_identifier: ack.transaction_set_identifier.clone(),
            usage_indicator_code: ack.usage_indicator_code,
        }),
        _ => Err(RoutingError::AckConfigCardinality { found: acks.len() }),
    }
}
