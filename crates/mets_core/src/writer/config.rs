//! Writer profile and namespace configuration.
//!
//! # Invariants
//! - A `WriterConfig` only reaches `MetsWriter` after `validate()` passes.
//! - Prefixes used by emitted element names are always declared.

use crate::error::ConfigurationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Packaging profile the emitted documents follow.
pub const DEFAULT_PROFILE: &str = "http://example.com/scape-mets-profile.xml";
/// Schema location advertised on the root element by default.
pub const DEFAULT_SCHEMA_LOCATION: &str =
    "http://www.loc.gov/METS/ http://www.loc.gov/standards/mets/mets.xsd";

pub const NS_METS: &str = "http://www.loc.gov/METS/";
pub const NS_XLINK: &str = "http://www.w3.org/1999/xlink";
pub const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
pub const NS_PREMIS: &str = "info:lc/xmlns/premis-v2";
pub const NS_TEXTMD: &str = "info:lc/xmlns/textMD-v3";
pub const NS_MIX: &str = "http://www.loc.gov/mix/v20";

/// Prefixes hard-wired into element and attribute names by the writer.
const REQUIRED_PREFIXES: &[&str] = &["mets", "xlink", "dc", "premis"];

static NCNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._\-]*$").expect("valid ncname regex"));

/// One `xmlns:<prefix>="<uri>"` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBinding {
    pub prefix: String,
    pub uri: String,
}

impl NamespaceBinding {
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }
}

/// Immutable settings for `MetsWriter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Value of the root `PROFILE` attribute.
    pub profile: String,
    /// Declared on the root element in this order.
    pub namespaces: Vec<NamespaceBinding>,
    /// `xsi:schemaLocation` value; requires an `xsi` binding when set.
    pub schema_location: Option<String>,
    /// Spaces per nesting level; `0` writes compact output.
    pub indent: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            namespaces: vec![
                NamespaceBinding::new("mets", NS_METS),
                NamespaceBinding::new("xlink", NS_XLINK),
                NamespaceBinding::new("xsi", NS_XSI),
                NamespaceBinding::new("dc", NS_DC),
                NamespaceBinding::new("premis", NS_PREMIS),
                NamespaceBinding::new("textmd", NS_TEXTMD),
                NamespaceBinding::new("mix", NS_MIX),
            ],
            schema_location: Some(DEFAULT_SCHEMA_LOCATION.to_string()),
            indent: 2,
        }
    }
}

impl WriterConfig {
    /// Checks profile and namespace table invariants.
    ///
    /// # Errors
    /// - `EmptyProfile` when `profile` is blank.
    /// - `InvalidPrefix` / `DuplicatePrefix` / `EmptyNamespaceUri` for a bad
    ///   binding.
    /// - `MissingPrefix` when a prefix the writer emits is not declared.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.profile.trim().is_empty() {
            return Err(ConfigurationError::EmptyProfile);
        }

        let mut declared = BTreeSet::new();
        for binding in &self.namespaces {
            if !is_valid_prefix(&binding.prefix) {
                return Err(ConfigurationError::InvalidPrefix(binding.prefix.clone()));
            }
            if binding.uri.trim().is_empty() {
                return Err(ConfigurationError::EmptyNamespaceUri(
                    binding.prefix.clone(),
                ));
            }
            if !declared.insert(binding.prefix.as_str()) {
                return Err(ConfigurationError::DuplicatePrefix(binding.prefix.clone()));
            }
        }

        for &prefix in REQUIRED_PREFIXES {
            if !declared.contains(prefix) {
                return Err(ConfigurationError::MissingPrefix(prefix));
            }
        }
        if self.schema_location.is_some() && !declared.contains("xsi") {
            return Err(ConfigurationError::MissingPrefix("xsi"));
        }
        Ok(())
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    NCNAME_RE.is_match(prefix) && !prefix.to_ascii_lowercase().starts_with("xml")
}

#[cfg(test)]
mod tests {
    use super::{NamespaceBinding, WriterConfig};
    use crate::error::ConfigurationError;

    #[test]
    fn default_config_is_valid() {
        WriterConfig::default()
            .validate()
            .expect("default config should validate");
    }

    #[test]
    fn rejects_duplicate_and_malformed_prefixes() {
        let mut config = WriterConfig::default();
        config
            .namespaces
            .push(NamespaceBinding::new("dc", "urn:other"));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::DuplicatePrefix("dc".to_string())
        );

        let mut config = WriterConfig::default();
        config.namespaces[6] = NamespaceBinding::new("1mix", "urn:mix");
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::InvalidPrefix("1mix".to_string())
        );

        let mut config = WriterConfig::default();
        config.namespaces[6] = NamespaceBinding::new("xmlns", "urn:mix");
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn schema_location_requires_xsi_binding() {
        let mut config = WriterConfig::default();
        config.namespaces.retain(|binding| binding.prefix != "xsi");
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::MissingPrefix("xsi")
        );

        config.schema_location = None;
        config.validate().expect("xsi is optional without schema location");
    }

    #[test]
    fn rejects_blank_profile_and_missing_mets_prefix() {
        let config = WriterConfig {
            profile: "  ".to_string(),
            ..WriterConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigurationError::EmptyProfile);

        let mut config = WriterConfig::default();
        config.namespaces.remove(0);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::MissingPrefix("mets")
        );
    }
}
