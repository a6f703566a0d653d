//! Entity-to-document assembly.
//!
//! # Responsibility
//! - Traverse an `IntellectualEntity` and build the matching `Document`.
//! - Generate every section id and thread file ids into file pointers.
//! - Aggregate the header agent roster from descriptive and provenance data.
//!
//! # Invariants
//! - Section `i` of admin sections, file groups and divisions comes from
//!   representation `i`.
//! - Agent roster order is contributors, creators, then linking agents in
//!   representation, event and agent order. Nothing is deduplicated.
//! - Validation happens before any id is spent on per-representation output.
//! - The assembler keeps no state between calls.

use crate::document::{
    AdminSection, AltRecordId, DescriptiveSection, Division, DocFile, Document, FileGroup,
    FileLocation, FilePointer, FileSection, Header, HeaderAgent, MetadataSection, MetadataWrap,
    StructMap, WrappedMetadata, DIVISION_TYPE_SECTION,
};
use crate::error::ValidationError;
use crate::id::{IdGenerator, UuidGenerator};
use crate::model::agent::Agent;
use crate::model::entity::{IntellectualEntity, Representation};
use crate::model::metadata::{DcMetadata, DescriptiveMetadata};
use chrono::{DateTime, Utc};

/// Builds `Document` trees from entities.
#[derive(Debug, Clone)]
pub struct DocumentAssembler<G: IdGenerator = UuidGenerator> {
    ids: G,
    profile: String,
}

impl DocumentAssembler<UuidGenerator> {
    /// Creates an assembler backed by random UUID identifiers.
    pub fn new(profile: impl Into<String>) -> Self {
        Self::with_generator(UuidGenerator, profile)
    }
}

impl<G: IdGenerator> DocumentAssembler<G> {
    pub fn with_generator(ids: G, profile: impl Into<String>) -> Self {
        Self {
            ids,
            profile: profile.into(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Assembles `entity` stamped with the current wall-clock time.
    pub fn assemble(&self, entity: &IntellectualEntity) -> Result<Document, ValidationError> {
        self.assemble_at(entity, Utc::now())
    }

    /// Assembles `entity` with an explicit header creation time.
    ///
    /// # Errors
    /// - `UnsupportedDescriptive` when descriptive metadata is not Dublin Core.
    /// - `MissingTitle` / `MissingDate` when the Dublin Core record lacks them.
    pub fn assemble_at(
        &self,
        entity: &IntellectualEntity,
        created: DateTime<Utc>,
    ) -> Result<Document, ValidationError> {
        let dc = descriptive_record(&entity.descriptive)?;
        let label = dc.titles.first().ok_or(ValidationError::MissingTitle)?;
        let described = *dc.dates.first().ok_or(ValidationError::MissingDate)?;

        let doc_id = self.ids.next_id();
        let header_id = self.ids.next_id();

        let mut agents: Vec<HeaderAgent> = dc
            .contributors
            .iter()
            .chain(dc.creators.iter())
            .map(|agent| self.header_agent(agent))
            .collect();

        let mut admin_sections = Vec::with_capacity(entity.representations.len());
        let mut groups = Vec::with_capacity(entity.representations.len());
        let mut divisions = Vec::with_capacity(entity.representations.len());
        for representation in &entity.representations {
            admin_sections.push(self.admin_section(representation));
            if let Some(events) = representation.provenance.events() {
                agents.extend(
                    events
                        .iter()
                        .flat_map(|event| event.linking_agents.iter())
                        .map(|agent| self.header_agent(agent)),
                );
            }
            let (group, division) = self.file_layout(representation);
            groups.push(group);
            divisions.push(division);
        }

        let header = Header {
            id: header_id,
            created,
            agents,
            alternative_ids: entity
                .alternative_identifiers
                .iter()
                .map(|identifier| AltRecordId {
                    id_type: identifier.id_type.clone(),
                    value: identifier.value.clone(),
                })
                .collect(),
        };
        let struct_map = StructMap {
            id: self.ids.next_id(),
            divisions,
        };
        let descriptive = DescriptiveSection {
            id: self.ids.next_id(),
            admin_id: self.ids.next_id(),
            created: described,
            wrap: MetadataWrap::new(WrappedMetadata::Descriptive(entity.descriptive.clone())),
        };
        let file_section = FileSection {
            id: self.ids.next_id(),
            groups,
        };

        Ok(Document {
            id: doc_id,
            label: label.clone(),
            obj_id: entity.identifier.value.clone(),
            profile: self.profile.clone(),
            descriptive,
            admin_sections,
            file_sections: vec![file_section],
            struct_maps: vec![struct_map],
            headers: vec![header],
        })
    }

    fn header_agent(&self, agent: &Agent) -> HeaderAgent {
        HeaderAgent::from_agent(self.ids.next_id(), agent)
    }

    fn admin_section(&self, representation: &Representation) -> AdminSection {
        AdminSection {
            provenance: MetadataSection {
                id: self.ids.next_id(),
                wrap: MetadataWrap::new(WrappedMetadata::Provenance(
                    representation.provenance.clone(),
                )),
            },
            technical: MetadataSection {
                id: self.ids.next_id(),
                wrap: MetadataWrap::new(WrappedMetadata::Technical(
                    representation.technical.clone(),
                )),
            },
        }
    }

    fn file_layout(&self, representation: &Representation) -> (FileGroup, Division) {
        let mut files = Vec::with_capacity(representation.files.len());
        let mut pointers = Vec::with_capacity(representation.files.len());
        for file in &representation.files {
            let locations = file
                .uris
                .iter()
                .map(|uri| FileLocation {
                    id: self.ids.next_id(),
                    href: uri.clone(),
                })
                .collect();
            let doc_file = DocFile {
                id: self.ids.next_id(),
                locations,
            };
            pointers.push(FilePointer {
                id: self.ids.next_id(),
                file_id: doc_file.id.clone(),
            });
            files.push(doc_file);
        }

        let division = Division {
            id: self.ids.next_id(),
            div_type: DIVISION_TYPE_SECTION.to_string(),
            pointers,
        };
        let group = FileGroup {
            id: self.ids.next_id(),
            files,
        };
        (group, division)
    }
}

fn descriptive_record(metadata: &DescriptiveMetadata) -> Result<&DcMetadata, ValidationError> {
    match metadata {
        DescriptiveMetadata::DublinCore(dc) => Ok(dc),
        DescriptiveMetadata::Opaque(raw) => Err(ValidationError::UnsupportedDescriptive {
            mdtype: raw.dialect.mdtype(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentAssembler;
    use crate::error::ValidationError;
    use crate::id::IdGenerator;
    use crate::model::entity::{Identifier, IntellectualEntity};
    use crate::model::metadata::{DcMetadata, DescriptiveMetadata, MetadataDialect, RawMetadata};
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingIds {
        next: AtomicUsize,
    }

    impl IdGenerator for CountingIds {
        fn next_id(&self) -> String {
            format!("id-{}", self.next.fetch_add(1, Ordering::Relaxed))
        }
    }

    fn entity(dc: DcMetadata) -> IntellectualEntity {
        IntellectualEntity::new(
            Identifier::new("local", "entity-1"),
            DescriptiveMetadata::DublinCore(dc),
        )
    }

    fn dated(titles: &[&str]) -> DcMetadata {
        DcMetadata {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            dates: vec![Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()],
            ..DcMetadata::default()
        }
    }

    #[test]
    fn validation_failure_consumes_no_ids() {
        let ids = CountingIds::default();
        let assembler = DocumentAssembler::with_generator(&ids, "profile");

        let err = assembler.assemble(&entity(dated(&[]))).unwrap_err();
        assert_eq!(err, ValidationError::MissingTitle);
        assert_eq!(ids.next.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn missing_date_is_rejected() {
        let assembler = DocumentAssembler::new("profile");
        let dc = DcMetadata {
            titles: vec!["Untitled".to_string()],
            ..DcMetadata::default()
        };
        assert_eq!(
            assembler.assemble(&entity(dc)).unwrap_err(),
            ValidationError::MissingDate
        );
    }

    #[test]
    fn opaque_descriptive_metadata_is_rejected() {
        let assembler = DocumentAssembler::new("profile");
        let entity = IntellectualEntity::new(
            Identifier::new("local", "entity-1"),
            DescriptiveMetadata::Opaque(RawMetadata::new(
                MetadataDialect::Other("MODS".to_string()),
                "<mods/>",
            )),
        );
        assert_eq!(
            assembler.assemble(&entity).unwrap_err(),
            ValidationError::UnsupportedDescriptive { mdtype: "OTHER" }
        );
    }

    #[test]
    fn empty_entity_spends_fixed_id_budget() {
        let ids = CountingIds::default();
        let assembler = DocumentAssembler::with_generator(&ids, "profile");

        let doc = assembler.assemble(&entity(dated(&["Only"]))).unwrap();
        // document, header, struct map, dmd section, linked admin id, file section
        assert_eq!(ids.next.load(Ordering::Relaxed), 6);
        assert_eq!(doc.id, "id-0");
        assert_eq!(doc.headers[0].id, "id-1");
        assert_eq!(doc.label, "Only");
        assert_eq!(doc.profile, "profile");
    }
}
