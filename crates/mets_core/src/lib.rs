//! METS packaging core for preservation records.
//! Turns an intellectual entity into a self-consistent METS document and
//! writes it to a caller-supplied stream.

pub mod assembler;
pub mod document;
pub mod error;
pub mod id;
pub mod logging;
pub mod model;
pub mod service;
pub mod writer;

pub use assembler::DocumentAssembler;
pub use document::integrity::verify_integrity;
pub use document::{
    AdminSection, AltRecordId, DescriptiveSection, Division, DocFile, Document, FileGroup,
    FileLocation, FilePointer, FileSection, Header, HeaderAgent, MetadataSection, MetadataWrap,
    StructMap, WrappedMetadata, DIVISION_TYPE_SECTION,
};
pub use error::{
    ConfigurationError, IntegrityError, MetsError, MetsResult, SerializationError,
    ValidationError,
};
pub use id::{IdGenerator, UuidGenerator};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LogSettings, LoggingError,
};
pub use model::agent::{Agent, AgentRole, AgentType};
pub use model::entity::{File, Identifier, IntellectualEntity, Representation};
pub use model::metadata::{
    DcMetadata, DescriptiveMetadata, Event, MetadataDialect, PremisProvenance,
    ProvenanceMetadata, RawMetadata,
};
pub use service::MetsSerializer;
pub use writer::{MetsWriter, NamespaceBinding, WriterConfig};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
