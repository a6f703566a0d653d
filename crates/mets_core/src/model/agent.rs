//! Agents attached to entities and provenance events.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// METS agent role vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentRole {
    Creator,
    Editor,
    Archivist,
    Preservation,
    Disseminator,
    Custodian,
    #[serde(rename = "IPOWNER")]
    IpOwner,
    Other,
}

impl AgentRole {
    /// Returns the attribute value used in METS `ROLE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "CREATOR",
            Self::Editor => "EDITOR",
            Self::Archivist => "ARCHIVIST",
            Self::Preservation => "PRESERVATION",
            Self::Disseminator => "DISSEMINATOR",
            Self::Custodian => "CUSTODIAN",
            Self::IpOwner => "IPOWNER",
            Self::Other => "OTHER",
        }
    }
}

impl Display for AgentRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// METS agent type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentType {
    Individual,
    Organization,
    Other,
}

impl AgentType {
    /// Returns the attribute value used in METS `TYPE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Organization => "ORGANIZATION",
            Self::Other => "OTHER",
        }
    }
}

impl Display for AgentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person or organization associated with an entity or event.
///
/// Two agents with equal fields are still distinct roster entries once
/// assembled; no identity is inferred from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub role: Option<AgentRole>,
    /// Free-text role, meaningful when `role == Some(AgentRole::Other)`.
    pub other_role: Option<String>,
    #[serde(rename = "type")]
    pub agent_type: Option<AgentType>,
    /// Free-text type, meaningful when `agent_type == Some(AgentType::Other)`.
    pub other_type: Option<String>,
    pub note: Option<String>,
}

impl Agent {
    /// Creates an agent with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            other_role: None,
            agent_type: None,
            other_type: None,
            note: None,
        }
    }

    pub fn with_role(mut self, role: AgentRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_type(mut self, agent_type: AgentType) -> Self {
        self.agent_type = Some(agent_type);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
