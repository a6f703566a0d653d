//! Public serialization entry point.
//!
//! # Responsibility
//! - Run assembly, integrity verification and writing as one call.
//! - Emit metadata-only diagnostic events for each call.
//!
//! # Invariants
//! - Validation and integrity failures return before `out` is touched.
//! - The service holds no mutable state; one instance may serve many threads.

use crate::assembler::DocumentAssembler;
use crate::document::integrity::verify_integrity;
use crate::document::Document;
use crate::error::{MetsError, MetsResult};
use crate::id::{IdGenerator, UuidGenerator};
use crate::model::entity::IntellectualEntity;
use crate::writer::{MetsWriter, WriterConfig};
use log::{debug, error, info};
use std::io::Write;

/// Assembles entities and writes them as METS documents.
#[derive(Debug, Clone)]
pub struct MetsSerializer<G: IdGenerator = UuidGenerator> {
    assembler: DocumentAssembler<G>,
    writer: MetsWriter,
}

impl MetsSerializer<UuidGenerator> {
    /// Builds a serializer from writer configuration.
    ///
    /// # Errors
    /// - Returns `MetsError::Configuration` when `config` is invalid.
    pub fn from_config(config: WriterConfig) -> MetsResult<Self> {
        let writer = MetsWriter::new(config)?;
        Ok(Self::new(writer))
    }

    pub fn new(writer: MetsWriter) -> Self {
        Self::with_generator(writer, UuidGenerator)
    }
}

impl<G: IdGenerator> MetsSerializer<G> {
    pub fn with_generator(writer: MetsWriter, ids: G) -> Self {
        let assembler = DocumentAssembler::with_generator(ids, writer.config().profile.clone());
        Self { assembler, writer }
    }

    pub fn writer(&self) -> &MetsWriter {
        &self.writer
    }

    /// Builds and verifies the document for `entity` without writing it.
    pub fn assemble(&self, entity: &IntellectualEntity) -> MetsResult<Document> {
        let document = self.assembler.assemble(entity)?;
        verify_integrity(&document)?;
        Ok(document)
    }

    /// Serializes `entity` into `out`.
    ///
    /// # Errors
    /// - `Validation` when descriptive metadata is unusable; `out` is untouched.
    /// - `Integrity` when the assembled document breaks an id invariant.
    /// - `Serialization` when writing to `out` fails; `out` may hold a
    ///   partial document.
    pub fn serialize<W: Write>(&self, entity: &IntellectualEntity, out: W) -> MetsResult<()> {
        let document = self.assemble(entity).inspect_err(|err| {
            error!(
                "event=mets_serialize module=service status=error stage=assemble kind={} obj_id={} error={}",
                err.kind(),
                entity.identifier.value,
                err
            );
        })?;
        debug!(
            "event=mets_assembled module=service status=ok doc_id={} representations={} files={} agents={}",
            document.id,
            document.admin_sections.len(),
            entity.file_count(),
            document.headers.iter().map(|h| h.agents.len()).sum::<usize>()
        );

        self.writer
            .write(&document, out)
            .map_err(MetsError::from)
            .inspect_err(|err| {
                error!(
                    "event=mets_serialize module=service status=error stage=write doc_id={} error={}",
                    document.id, err
                );
            })?;

        info!(
            "event=mets_serialize module=service status=ok doc_id={} obj_id={}",
            document.id, document.obj_id
        );
        Ok(())
    }
}
