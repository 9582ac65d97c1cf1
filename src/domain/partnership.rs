//! Partnership routing configuration
//!
//! A [`Partnership`] describes the routing rules between two trading partners.
//! Its transaction set entries are stored as loosely-shaped JSON; they are
//! converted into the [`TransactionSetConfig`] sum type when loaded so every
//! later lookup matches exhaustively on known shapes.

use super::errors::{EdiError, RoutingError};
use super::ids::{GuideId, MappingId, PartnerId};
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Transaction set identifiers that denote acknowledgments
pub const ACK_TRANSACTION_SETS: [&str; 3] = ["997", "999", "TA1"];

/// Interchange usage indicator (ISA15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageIndicatorCode {
    /// Production
    P,
    /// Test
    T,
    /// Information
    I,
}

impl UsageIndicatorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageIndicatorCode::P => "P",
            UsageIndicatorCode::T => "T",
            UsageIndicatorCode::I => "I",
        }
    }
}

impl fmt::Display for UsageIndicatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageIndicatorCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P" => Ok(UsageIndicatorCode::P),
            "T" => Ok(UsageIndicatorCode::T),
            "I" => Ok(UsageIndicatorCode::I),
            other => Err(format!(
                "Invalid usage indicator code '{other}'. Must be one of: P, T, I"
            )),
        }
    }
}

/// Routing configuration between a sending and a receiving partner
#[derive(Debug, Clone, PartialEq)]
pub struct Partnership {
    pub sending_partner_id: PartnerId,
    pub receiving_partner_id: PartnerId,
    pub transaction_sets: Vec<TransactionSetConfig>,
}

impl Partnership {
    /// Parses a partnership document
    ///
    /// # Errors
    ///
    /// Returns [`EdiError::Serialization`] if the JSON is malformed and
    /// [`RoutingError::InvalidConfiguration`] if a transaction set entry
    /// matches none of the known shapes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: RawPartnership = serde_json::from_slice(bytes)?;
        let transaction_sets = raw
            .transaction_sets
            .into_iter()
            .map(TransactionSetConfig::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(EdiError::from)?;

        Ok(Self {
            sending_partner_id: raw.sending_partner_id,
            receiving_partner_id: raw.receiving_partner_id,
            transaction_sets,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPartnership {
    sending_partner_id: PartnerId,
    receiving_partner_id: PartnerId,
    #[serde(default)]
    transaction_sets: Vec<RawTransactionSetConfig>,
}

/// Which partners a transaction set entry applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartnerScope {
    /// Acknowledgments; partners are inferred from the acknowledged interchange
    Ack,
    /// Explicit sending/receiving partner pair
    Partners {
        sending_partner_id: PartnerId,
        receiving_partner_id: PartnerId,
    },
}

/// Whether a transaction set entry is bound to a mapping guide
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideBinding {
    /// Routable to the transform engine
    WithGuideId {
        guide_id: GuideId,
        destinations: Vec<Destination>,
    },
    /// Not routable to a transform
    WithoutGuideId,
}

/// One transaction set routing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTransactionSetConfig", into = "RawTransactionSetConfig")]
pub struct TransactionSetConfig {
    pub transaction_set_identifier: Option<String>,
    pub usage_indicator_code: Option<UsageIndicatorCode>,
    pub scope: PartnerScope,
    pub binding: GuideBinding,
}

impl TransactionSetConfig {
    /// Returns true for acknowledgment entries
    pub fn is_ack(&self) -> bool {
        matches!(self.scope, PartnerScope::Ack)
    }

    /// Guide id, if the entry is guide-bound
    pub fn guide_id(&self) -> Option<&GuideId> {
        match &self.binding {
            GuideBinding::WithGuideId { guide_id, .. } => Some(guide_id),
            GuideBinding::WithoutGuideId => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransactionSetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sending_partner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receiving_partner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transaction_set_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage_indicator_code: Option<UsageIndicatorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guide_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    destinations: Vec<Destination>,
}

impl TryFrom<RawTransactionSetConfig> for TransactionSetConfig {
    type Error = RoutingError;

    fn try_from(raw: RawTransactionSetConfig) -> std::result::Result<Self, Self::Error> {
        let invalid = |reason: &str| RoutingError::InvalidConfiguration(reason.to_string());

        let scope = match (raw.sending_partner_id, raw.receiving_partner_id) {
            (Some(sending), Some(receiving)) => PartnerScope::Partners {
                sending_partner_id: PartnerId::new(sending).map_err(|e| invalid(&e))?,
                receiving_partner_id: PartnerId::new(receiving).map_err(|e| invalid(&e))?,
            },
            (None, None) => {
                let is_ack = raw
                    .transaction_set_identifier
                    .as_deref()
                    .map(|id| ACK_TRANSACTION_SETS.contains(&id))
                    .unwrap_or(false);
                if !is_ack {
                    return Err(invalid(
                        "entry without partner ids must be an acknowledgment transaction set",
                    ));
                }
                PartnerScope::Ack
            }
            _ => {
                return Err(invalid(
                    "sendingPartnerId and receivingPartnerId must be provided together",
                ))
            }
        };

        let binding = match raw.guide_id {
            Some(guide_id) => {
                for destination in &raw.destinations {
                    destination
                        .destination
                        .validate()
                        .map_err(|e| invalid(&e))?;
                }
                GuideBinding::WithGuideId {
                    guide_id: GuideId::new(guide_id).map_err(|e| invalid(&e))?,
                    destinations: raw.destinations,
                }
            }
            None if raw.destinations.is_empty() => GuideBinding::WithoutGuideId,
            None => return Err(invalid("destinations require a guideId")),
        };

        Ok(Self {
            transaction_set_identifier: raw.transaction_set_identifier,
            usage_indicator_code: raw.usage_indicator_code,
            scope,
            binding,
        })
    }
}

impl From<TransactionSetConfig> for RawTransactionSetConfig {
    fn from(config: TransactionSetConfig) -> Self {
        let (sending_partner_id, receiving_partner_id) = match config.scope {
            PartnerScope::Ack => (None, None),
            PartnerScope::Partners {
                sending_partner_id,
                receiving_partner_id,
            } => (
                Some(sending_partner_id.into_inner()),
                Some(receiving_partner_id.into_inner()),
            ),
        };
        let (guide_id, destinations) = match config.binding {
            GuideBinding::WithGuideId {
                guide_id,
                destinations,
            } => (Some(guide_id.into_inner()), destinations),
            GuideBinding::WithoutGuideId => (None, Vec::new()),
        };

        Self {
            sending_partner_id,
            receiving_partner_id,
            transaction_set_identifier: config.transaction_set_identifier,
            usage_indicator_code: config.usage_indicator_code,
            guide_id,
            destinations,
        }
    }
}

/// A delivery target plus the mapping used to produce its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub destination: DestinationTarget,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_id: Option<MappingId>,
}

/// HTTP method used for webhook deliveries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookVerb {
    #[default]
    Post,
    Put,
    Patch,
}

/// Sink descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DestinationTarget {
    /// HTTP endpoint receiving the payload as JSON
    #[serde(rename_all = "camelCase")]
    Webhook {
        url: String,
        #[serde(default)]
        verb: WebhookVerb,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },

    /// Object written into a bucket under a path prefix
    #[serde(rename_all = "camelCase")]
    Bucket { bucket_name: String, path: String },
}

impl DestinationTarget {
    /// Checks that the descriptor is usable
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            DestinationTarget::Webhook { url, .. } => {
                let parsed = url::Url::parse(url)
                    .map_err(|e| format!("invalid webhook url '{url}': {e}"))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(format!("webhook url '{url}' must use http or https"));
                }
                Ok(())
            }
            DestinationTarget::Bucket { bucket_name, .. } => {
                if bucket_name.trim().is_empty() {
                    return Err("bucket destination requires a bucketName".to_string());
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for DestinationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationTarget::Webhook { url, .. } => write!(f, "webhook {url}"),
            DestinationTarget::Bucket { bucket_name, path } => {
                write!(f, "bucket {bucket_name}/{path}")
            }
        }
    }
}

/// Resolved mapping guide for a transaction set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSummary {
    pub guide_id: GuideId,
    pub transaction_set: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
