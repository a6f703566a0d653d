//! Intellectual entity, representation and file records.
//!
//! # Invariants
//! - `IntellectualEntity::representations` order defines the order of every
//!   per-representation section in the assembled document.
//! - `File::uris` are carried verbatim; core does not parse or resolve them.

use crate::model::metadata::{DescriptiveMetadata, ProvenanceMetadata, RawMetadata};
use serde::{Deserialize, Serialize};

/// Typed identifier value, e.g. `{ type: "DOI", value: "10.1000/182" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub id_type: String,
    pub value: String,
}

impl Identifier {
    pub fn new(id_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id_type: id_type.into(),
            value: value.into(),
        }
    }
}

/// One stored file with one or more locations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct File {
    pub uris: Vec<String>,
}

impl File {
    /// Creates a file reachable at a single location.
    pub fn at(uri: impl Into<String>) -> Self {
        Self {
            uris: vec![uri.into()],
        }
    }
}

/// One realized form of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    /// Human label; informational only, not used during assembly.
    pub title: Option<String>,
    pub provenance: ProvenanceMetadata,
    pub technical: RawMetadata,
    pub files: Vec<File>,
}

/// The preservation record being packaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntellectualEntity {
    pub identifier: Identifier,
    pub descriptive: DescriptiveMetadata,
    #[serde(default)]
    pub alternative_identifiers: Vec<Identifier>,
    #[serde(default)]
    pub representations: Vec<Representation>,
}

impl IntellectualEntity {
    /// Creates an entity without alternative identifiers or representations.
    pub fn new(identifier: Identifier, descriptive: DescriptiveMetadata) -> Self {
        Self {
            identifier,
            descriptive,
            alternative_identifiers: Vec::new(),
            representations: Vec::new(),
        }
    }

    /// Total number of files across all representations.
    pub fn file_count(&self) -> usize {
        self.representations.iter().map(|rep| rep.files.len()).sum()
    }
}
