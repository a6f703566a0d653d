//! METS document tree produced by assembly.
//!
//! # Responsibility
//! - Hold the fully-resolved output structure handed to the writer.
//!
//! # Invariants
//! - `admin_sections[i]`, `file_sections[0].groups[i]` and
//!   `struct_maps[0].divisions[i]` describe the same source representation.
//! - Every `FilePointer::file_id` names a `DocFile::id` in the same document.
//! - A tree is never mutated after it reaches the writer.
//!
//! # See also
//! - `integrity::verify_integrity`

pub mod integrity;

use crate::model::agent::{Agent, AgentRole, AgentType};
use crate::model::metadata::{
    DescriptiveMetadata, MetadataDialect, ProvenanceMetadata, RawMetadata,
};
use chrono::{DateTime, Utc};

/// Division type assigned to every representation division.
pub const DIVISION_TYPE_SECTION: &str = "section";

/// Payload carried by one `mdWrap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrappedMetadata {
    Descriptive(DescriptiveMetadata),
    Provenance(ProvenanceMetadata),
    Technical(RawMetadata),
}

impl WrappedMetadata {
    pub fn dialect(&self) -> MetadataDialect {
        match self {
            Self::Descriptive(md) => md.dialect(),
            Self::Provenance(md) => md.dialect(),
            Self::Technical(raw) => raw.dialect.clone(),
        }
    }
}

/// `mdWrap` element: a payload plus its dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataWrap {
    pub payload: WrappedMetadata,
}

impl MetadataWrap {
    pub fn new(payload: WrappedMetadata) -> Self {
        Self { payload }
    }
}

/// `techMD` / `digiprovMD` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSection {
    pub id: String,
    pub wrap: MetadataWrap,
}

/// `amdSec` for one representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSection {
    pub technical: MetadataSection,
    pub provenance: MetadataSection,
}

/// `dmdSec` for the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptiveSection {
    pub id: String,
    pub admin_id: String,
    pub created: DateTime<Utc>,
    pub wrap: MetadataWrap,
}

/// `FLocat` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub id: String,
    pub href: String,
}

/// `file` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFile {
    pub id: String,
    pub locations: Vec<FileLocation>,
}

/// `fileGrp` element, one per representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub id: String,
    pub files: Vec<DocFile>,
}

impl FileGroup {
    pub fn file_ids(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.id.as_str())
    }
}

/// `fileSec` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSection {
    pub id: String,
    pub groups: Vec<FileGroup>,
}

/// `fptr` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePointer {
    pub id: String,
    pub file_id: String,
}

/// `div` element, one per representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub id: String,
    pub div_type: String,
    pub pointers: Vec<FilePointer>,
}

impl Division {
    pub fn target_file_ids(&self) -> impl Iterator<Item = &str> {
        self.pointers.iter().map(|pointer| pointer.file_id.as_str())
    }
}

/// `structMap` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructMap {
    pub id: String,
    pub divisions: Vec<Division>,
}

/// Header `agent` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAgent {
    pub id: String,
    pub name: String,
    pub role: Option<AgentRole>,
    pub other_role: Option<String>,
    pub agent_type: Option<AgentType>,
    pub other_type: Option<String>,
    pub note: Option<String>,
}

impl HeaderAgent {
    /// Copies every field of `agent` under a freshly generated id.
    pub fn from_agent(id: String, agent: &Agent) -> Self {
        Self {
            id,
            name: agent.name.clone(),
            role: agent.role,
            other_role: agent.other_role.clone(),
            agent_type: agent.agent_type,
            other_type: agent.other_type.clone(),
            note: agent.note.clone(),
        }
    }
}

/// `altRecordID` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltRecordId {
    pub id_type: String,
    pub value: String,
}

/// `metsHdr` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: String,
    pub created: DateTime<Utc>,
    pub agents: Vec<HeaderAgent>,
    pub alternative_ids: Vec<AltRecordId>,
}

/// Root `mets` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub label: String,
    pub obj_id: String,
    pub profile: String,
    pub descriptive: DescriptiveSection,
    pub admin_sections: Vec<AdminSection>,
    pub file_sections: Vec<FileSection>,
    pub struct_maps: Vec<StructMap>,
    pub headers: Vec<Header>,
}

impl Document {
    /// Every generated identifier in document order.
    ///
    /// `DescriptiveSection::admin_id` is a reference, not a declaration, and
    /// is left out.
    pub fn declared_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.id.as_str(), self.descriptive.id.as_str()];
        for section in &self.admin_sections {
            ids.push(section.technical.id.as_str());
            ids.push(section.provenance.id.as_str());
        }
        for file_section in &self.file_sections {
            ids.push(file_section.id.as_str());
            for group in &file_section.groups {
                ids.push(group.id.as_str());
                for file in &group.files {
                    ids.push(file.id.as_str());
                    ids.extend(file.locations.iter().map(|loc| loc.id.as_str()));
                }
            }
        }
        for struct_map in &self.struct_maps {
            ids.push(struct_map.id.as_str());
            for division in &struct_map.divisions {
                ids.push(division.id.as_str());
                ids.extend(division.pointers.iter().map(|ptr| ptr.id.as_str()));
            }
        }
        for header in &self.headers {
            ids.push(header.id.as_str());
            ids.extend(header.agents.iter().map(|agent| agent.id.as_str()));
        }
        ids
    }

    /// File groups across all file sections, in order.
    pub fn file_groups(&self) -> impl Iterator<Item = &FileGroup> {
        self.file_sections.iter().flat_map(|section| section.groups.iter())
    }

    /// Divisions across all structural maps, in order.
    pub fn divisions(&self) -> impl Iterator<Item = &Division> {
        self.struct_maps.iter().flat_map(|map| map.divisions.iter())
    }
}
