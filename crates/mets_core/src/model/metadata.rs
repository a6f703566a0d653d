//! Metadata payloads carried by entities and representations.
//!
//! # Responsibility
//! - Model the two structured variants core reads from: Dublin Core
//!   descriptive records and PREMIS-style event provenance.
//! - Carry every other payload as an opaque, pre-rendered XML fragment.
//!
//! # Invariants
//! - `RawMetadata::xml` is embedded verbatim; it must already be well-formed.

use crate::model::agent::Agent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata dialect of a wrapped payload, mapped to METS `MDTYPE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataDialect {
    DublinCore,
    Premis,
    TextMd,
    NisoMix,
    /// Any dialect without a registered METS type; rendered as `OTHERMDTYPE`.
    Other(String),
}

impl MetadataDialect {
    /// Returns the METS `MDTYPE` attribute value.
    pub fn mdtype(&self) -> &'static str {
        match self {
            Self::DublinCore => "DC",
            Self::Premis => "PREMIS",
            Self::TextMd => "TEXTMD",
            Self::NisoMix => "NISOIMG",
            Self::Other(_) => "OTHER",
        }
    }

    /// Returns the METS `OTHERMDTYPE` attribute value, when one applies.
    pub fn other_mdtype(&self) -> Option<&str> {
        match self {
            Self::Other(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Pre-rendered metadata fragment of a known dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetadata {
    pub dialect: MetadataDialect,
    pub xml: String,
}

impl RawMetadata {
    pub fn new(dialect: MetadataDialect, xml: impl Into<String>) -> Self {
        Self {
            dialect,
            xml: xml.into(),
        }
    }
}

/// Dublin Core descriptive record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DcMetadata {
    pub titles: Vec<String>,
    pub dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub creators: Vec<Agent>,
    #[serde(default)]
    pub contributors: Vec<Agent>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Entity-level descriptive metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum DescriptiveMetadata {
    DublinCore(DcMetadata),
    Opaque(RawMetadata),
}

impl DescriptiveMetadata {
    /// Returns the dialect used for the `mdWrap` of this payload.
    pub fn dialect(&self) -> MetadataDialect {
        match self {
            Self::DublinCore(_) => MetadataDialect::DublinCore,
            Self::Opaque(raw) => raw.dialect.clone(),
        }
    }
}

/// One preservation event, e.g. an ingest or a format migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub identifier: String,
    pub event_type: String,
    pub date_time: Option<DateTime<Utc>>,
    pub detail: Option<String>,
    #[serde(default)]
    pub linking_agents: Vec<Agent>,
}

/// Event-based provenance record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PremisProvenance {
    pub events: Vec<Event>,
}

/// Per-representation provenance metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ProvenanceMetadata {
    Premis(PremisProvenance),
    Opaque(RawMetadata),
}

impl ProvenanceMetadata {
    /// Returns structured events, or `None` for opaque payloads.
    pub fn events(&self) -> Option<&[Event]> {
        match self {
            Self::Premis(premis) => Some(premis.events.as_slice()),
            Self::Opaque(_) => None,
        }
    }

    pub fn dialect(&self) -> MetadataDialect {
        match self {
            Self::Premis(_) => MetadataDialect::Premis,
            Self::Opaque(raw) => raw.dialect.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MetadataDialect, ProvenanceMetadata, RawMetadata};

    #[test]
    fn other_dialect_maps_to_othermdtype() {
        let dialect = MetadataDialect::Other("EAD3".to_string());
        assert_eq!(dialect.mdtype(), "OTHER");
        assert_eq!(dialect.other_mdtype(), Some("EAD3"));
        assert_eq!(MetadataDialect::NisoMix.other_mdtype(), None);
    }

    #[test]
    fn opaque_provenance_exposes_no_events() {
        let provenance =
            ProvenanceMetadata::Opaque(RawMetadata::new(MetadataDialect::Premis, "<premis/>"));
        assert!(provenance.events().is_none());
    }
}
