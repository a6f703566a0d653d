//! Error taxonomy for configuration, assembly and serialization.
//!
//! # Invariants
//! - Every failure is surfaced to the caller of `serialize`; none are retried.
//! - `Validation` and `Integrity` errors are raised before any byte is written.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MetsResult<T> = Result<T, MetsError>;

/// Writer configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    EmptyProfile,
    InvalidPrefix(String),
    DuplicatePrefix(String),
    EmptyNamespaceUri(String),
    MissingPrefix(&'static str),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProfile => write!(f, "profile uri cannot be empty"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "namespace prefix `{prefix}` is not a valid XML name")
            }
            Self::DuplicatePrefix(prefix) => {
                write!(f, "namespace prefix `{prefix}` is declared more than once")
            }
            Self::EmptyNamespaceUri(prefix) => {
                write!(f, "namespace uri for prefix `{prefix}` cannot be empty")
            }
            Self::MissingPrefix(prefix) => {
                write!(f, "required namespace prefix `{prefix}` is not declared")
            }
        }
    }
}

impl Error for ConfigurationError {}

/// Input entity cannot be assembled into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Descriptive metadata has no title to label the document.
    MissingTitle,
    /// Descriptive metadata has no date for the descriptive section.
    MissingDate,
    /// Descriptive metadata is not a Dublin Core record.
    UnsupportedDescriptive { mdtype: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "descriptive metadata has no title"),
            Self::MissingDate => write!(f, "descriptive metadata has no date"),
            Self::UnsupportedDescriptive { mdtype } => write!(
                f,
                "descriptive metadata of type `{mdtype}` is not supported; expected DC"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Assembled document violates an identifier invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    DuplicateId(String),
    DanglingFilePointer { pointer_id: String, file_id: String },
    MisalignedSections {
        admin_sections: usize,
        file_groups: usize,
        divisions: usize,
    },
    DivisionMismatch { index: usize },
}

impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "identifier `{id}` is used more than once"),
            Self::DanglingFilePointer {
                pointer_id,
                file_id,
            } => write!(
                f,
                "file pointer `{pointer_id}` references unknown file `{file_id}`"
            ),
            Self::MisalignedSections {
                admin_sections,
                file_groups,
                divisions,
            } => write!(
                f,
                "section counts differ: {admin_sections} admin, {file_groups} file groups, {divisions} divisions"
            ),
            Self::DivisionMismatch { index } => write!(
                f,
                "division {index} does not point at the files of file group {index}"
            ),
        }
    }
}

impl Error for IntegrityError {}

/// Writer failed while emitting the document.
#[derive(Debug)]
pub enum SerializationError {
    Io(std::io::Error),
    Xml(quick_xml::Error),
}

impl Display for SerializationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write document: {err}"),
            Self::Xml(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for SerializationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Xml(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<quick_xml::Error> for SerializationError {
    fn from(value: quick_xml::Error) -> Self {
        match value {
            quick_xml::Error::Io(err) => Self::Io(std::io::Error::new(err.kind(), err.to_string())),
            other => Self::Xml(other),
        }
    }
}

/// Top-level error returned by the serializer service.
#[derive(Debug)]
pub enum MetsError {
    Configuration(ConfigurationError),
    Validation(ValidationError),
    Integrity(IntegrityError),
    Serialization(SerializationError),
}

impl MetsError {
    /// Short machine-readable category used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Validation(_) => "validation",
            Self::Integrity(_) => "integrity",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl Display for MetsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Integrity(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MetsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Integrity(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for MetsError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

impl From<ValidationError> for MetsError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<IntegrityError> for MetsError {
    fn from(value: IntegrityError) -> Self {
        Self::Integrity(value)
    }
}

impl From<SerializationError> for MetsError {
    fn from(value: SerializationError) -> Self {
        Self::Serialization(value)
    }
}

impl From<std::io::Error> for MetsError {
    fn from(value: std::io::Error) -> Self {
        Self::Serialization(SerializationError::Io(value))
    }
}
