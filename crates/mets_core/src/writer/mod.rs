//! XML serialization of assembled documents.
//!
//! # Responsibility
//! - Emit a `Document` as METS XML under a validated `WriterConfig`.
//! - Render Dublin Core and PREMIS payloads; embed opaque fragments verbatim.
//!
//! # Invariants
//! - Section order: `dmdSec`, `amdSec`*, `fileSec`, `structMap`, `metsHdr`.
//! - A `MetsWriter` is immutable after construction and safe to share.
//! - Output state after a failed write is undefined; nothing is rolled back.

pub mod config;

use crate::document::{
    AdminSection, DescriptiveSection, Document, FileSection, Header, MetadataSection,
    MetadataWrap, StructMap, WrappedMetadata,
};
use crate::error::{ConfigurationError, SerializationError};
use crate::model::metadata::{
    DcMetadata, DescriptiveMetadata, PremisProvenance, ProvenanceMetadata,
};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

pub use config::{NamespaceBinding, WriterConfig};

type EmitResult = Result<(), SerializationError>;

/// Reusable METS writer.
#[derive(Debug, Clone)]
pub struct MetsWriter {
    config: WriterConfig,
}

impl MetsWriter {
    /// Validates `config` and builds a writer around it.
    pub fn new(config: WriterConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Writes `document` to `out` and flushes it.
    pub fn write<W: Write>(&self, document: &Document, out: W) -> EmitResult {
        let xml = if self.config.indent == 0 {
            Writer::new(out)
        } else {
            Writer::new_with_indent(out, b' ', self.config.indent)
        };
        let mut emitter = Emitter { xml };
        emitter.document(document, &self.config)?;
        let mut out = emitter.xml.into_inner();
        out.flush()?;
        Ok(())
    }
}

struct Emitter<W: Write> {
    xml: Writer<W>,
}

impl<W: Write> Emitter<W> {
    fn document(&mut self, document: &Document, config: &WriterConfig) -> EmitResult {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("mets:mets");
        for binding in &config.namespaces {
            let key = format!("xmlns:{}", binding.prefix);
            root.push_attribute((key.as_str(), binding.uri.as_str()));
        }
        if let Some(location) = &config.schema_location {
            root.push_attribute(("xsi:schemaLocation", location.as_str()));
        }
        root.push_attribute(("ID", document.id.as_str()));
        root.push_attribute(("LABEL", document.label.as_str()));
        root.push_attribute(("OBJID", document.obj_id.as_str()));
        root.push_attribute(("PROFILE", document.profile.as_str()));
        self.start(root)?;

        self.descriptive_section(&document.descriptive)?;
        for section in &document.admin_sections {
            self.admin_section(section)?;
        }
        for section in &document.file_sections {
            self.file_section(section)?;
        }
        for map in &document.struct_maps {
            self.struct_map(map)?;
        }
        for header in &document.headers {
            self.header(header)?;
        }

        self.end("mets:mets")
    }

    fn descriptive_section(&mut self, section: &DescriptiveSection) -> EmitResult {
        let created = timestamp(&section.created);
        self.start(BytesStart::new("mets:dmdSec").with_attributes([
            ("ID", section.id.as_str()),
            ("ADMID", section.admin_id.as_str()),
            ("CREATED", created.as_str()),
        ]))?;
        self.metadata_wrap(&section.wrap)?;
        self.end("mets:dmdSec")
    }

    fn admin_section(&mut self, section: &AdminSection) -> EmitResult {
        self.start(BytesStart::new("mets:amdSec"))?;
        self.metadata_section("mets:techMD", &section.technical)?;
        self.metadata_section("mets:digiprovMD", &section.provenance)?;
        self.end("mets:amdSec")
    }

    fn metadata_section(&mut self, name: &str, section: &MetadataSection) -> EmitResult {
        self.start(identified(name, &section.id))?;
        self.metadata_wrap(&section.wrap)?;
        self.end(name)
    }

    fn metadata_wrap(&mut self, wrap: &MetadataWrap) -> EmitResult {
        let dialect = wrap.payload.dialect();
        let mut element = BytesStart::new("mets:mdWrap");
        element.push_attribute(("MDTYPE", dialect.mdtype()));
        if let Some(other) = dialect.other_mdtype() {
            element.push_attribute(("OTHERMDTYPE", other));
        }
        self.start(element)?;
        self.start(BytesStart::new("mets:xmlData"))?;
        match &wrap.payload {
            WrappedMetadata::Descriptive(DescriptiveMetadata::DublinCore(dc)) => {
                self.dublin_core(dc)?
            }
            WrappedMetadata::Provenance(ProvenanceMetadata::Premis(premis)) => {
                self.premis(premis)?
            }
            WrappedMetadata::Descriptive(DescriptiveMetadata::Opaque(raw))
            | WrappedMetadata::Provenance(ProvenanceMetadata::Opaque(raw))
            | WrappedMetadata::Technical(raw) => self.raw(&raw.xml)?,
        }
        self.end("mets:xmlData")?;
        self.end("mets:mdWrap")
    }

    fn dublin_core(&mut self, dc: &DcMetadata) -> EmitResult {
        self.start(BytesStart::new("dc:record"))?;
        for title in &dc.titles {
            self.text_element("dc:title", title)?;
        }
        for date in &dc.dates {
            self.text_element("dc:date", &timestamp(date))?;
        }
        for creator in &dc.creators {
            self.text_element("dc:creator", &creator.name)?;
        }
        for contributor in &dc.contributors {
            self.text_element("dc:contributor", &contributor.name)?;
        }
        for description in &dc.descriptions {
            self.text_element("dc:description", description)?;
        }
        for subject in &dc.subjects {
            self.text_element("dc:subject", subject)?;
        }
        for language in &dc.languages {
            self.text_element("dc:language", language)?;
        }
        self.end("dc:record")
    }

    fn premis(&mut self, premis: &PremisProvenance) -> EmitResult {
        self.start(BytesStart::new("premis:premis"))?;
        for event in &premis.events {
            self.start(BytesStart::new("premis:event"))?;
            self.start(BytesStart::new("premis:eventIdentifier"))?;
            self.text_element("premis:eventIdentifierType", "local")?;
            self.text_element("premis:eventIdentifierValue", &event.identifier)?;
            self.end("premis:eventIdentifier")?;
            self.text_element("premis:eventType", &event.event_type)?;
            if let Some(date_time) = &event.date_time {
                self.text_element("premis:eventDateTime", &timestamp(date_time))?;
            }
            if let Some(detail) = &event.detail {
                self.text_element("premis:eventDetail", detail)?;
            }
            for agent in &event.linking_agents {
                self.start(BytesStart::new("premis:linkingAgentIdentifier"))?;
                self.text_element("premis:linkingAgentIdentifierType", "name")?;
                self.text_element("premis:linkingAgentIdentifierValue", &agent.name)?;
                if let Some(role) = agent.role {
                    self.text_element("premis:linkingAgentRole", role.as_str())?;
                }
                self.end("premis:linkingAgentIdentifier")?;
            }
            self.end("premis:event")?;
        }
        self.end("premis:premis")
    }

    fn file_section(&mut self, section: &FileSection) -> EmitResult {
        self.start(identified("mets:fileSec", &section.id))?;
        for group in &section.groups {
            self.start(identified("mets:fileGrp", &group.id))?;
            for file in &group.files {
                self.start(identified("mets:file", &file.id))?;
                for location in &file.locations {
                    self.empty(BytesStart::new("mets:FLocat").with_attributes([
                        ("ID", location.id.as_str()),
                        ("LOCTYPE", "URL"),
                        ("xlink:href", location.href.as_str()),
                    ]))?;
                }
                self.end("mets:file")?;
            }
            self.end("mets:fileGrp")?;
        }
        self.end("mets:fileSec")
    }

    fn struct_map(&mut self, map: &StructMap) -> EmitResult {
        self.start(identified("mets:structMap", &map.id))?;
        for division in &map.divisions {
            self.start(BytesStart::new("mets:div").with_attributes([
                ("ID", division.id.as_str()),
                ("TYPE", division.div_type.as_str()),
            ]))?;
            for pointer in &division.pointers {
                self.empty(BytesStart::new("mets:fptr").with_attributes([
                    ("ID", pointer.id.as_str()),
                    ("FILEID", pointer.file_id.as_str()),
                ]))?;
            }
            self.end("mets:div")?;
        }
        self.end("mets:structMap")
    }

    fn header(&mut self, header: &Header) -> EmitResult {
        let created = timestamp(&header.created);
        self.start(BytesStart::new("mets:metsHdr").with_attributes([
            ("ID", header.id.as_str()),
            ("CREATEDATE", created.as_str()),
        ]))?;
        for agent in &header.agents {
            let mut element = BytesStart::new("mets:agent");
            element.push_attribute(("ID", agent.id.as_str()));
            if let Some(role) = agent.role {
                element.push_attribute(("ROLE", role.as_str()));
            }
            if let Some(other_role) = &agent.other_role {
                element.push_attribute(("OTHERROLE", other_role.as_str()));
            }
            if let Some(agent_type) = agent.agent_type {
                element.push_attribute(("TYPE", agent_type.as_str()));
            }
            if let Some(other_type) = &agent.other_type {
                element.push_attribute(("OTHERTYPE", other_type.as_str()));
            }
            self.start(element)?;
            self.text_element("mets:name", &agent.name)?;
            if let Some(note) = &agent.note {
                self.text_element("mets:note", note)?;
            }
            self.end("mets:agent")?;
        }
        for alt in &header.alternative_ids {
            let element =
                BytesStart::new("mets:altRecordID").with_attributes([("TYPE", alt.id_type.as_str())]);
            self.start(element)?;
            self.xml.write_event(Event::Text(BytesText::new(&alt.value)))?;
            self.end("mets:altRecordID")?;
        }
        self.end("mets:metsHdr")
    }

    fn text_element(&mut self, name: &str, text: &str) -> EmitResult {
        self.start(BytesStart::new(name))?;
        self.xml.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn raw(&mut self, fragment: &str) -> EmitResult {
        self.xml
            .write_event(Event::Text(BytesText::from_escaped(fragment)))?;
        Ok(())
    }

    fn start(&mut self, element: BytesStart<'_>) -> EmitResult {
        self.xml.write_event(Event::Start(element))?;
        Ok(())
    }

    fn empty(&mut self, element: BytesStart<'_>) -> EmitResult {
        self.xml.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> EmitResult {
        self.xml.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

fn identified<'a>(name: &'a str, id: &'a str) -> BytesStart<'a> {
    BytesStart::new(name).with_attributes([("ID", id)])
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::{MetsWriter, WriterConfig};
    use crate::assembler::DocumentAssembler;
    use crate::model::agent::{Agent, AgentRole};
    use crate::model::entity::{File, Identifier, IntellectualEntity, Representation};
    use crate::model::metadata::{
        DcMetadata, DescriptiveMetadata, Event, MetadataDialect, PremisProvenance,
        ProvenanceMetadata, RawMetadata,
    };
    use chrono::{TimeZone, Utc};

    fn render(entity: &IntellectualEntity, config: WriterConfig) -> String {
        let writer = MetsWriter::new(config).expect("valid config");
        let document = DocumentAssembler::new(writer.config().profile.clone())
            .assemble(entity)
            .expect("entity should assemble");
        let mut out = Vec::new();
        writer.write(&document, &mut out).expect("write should succeed");
        String::from_utf8(out).expect("output should be UTF-8")
    }

    fn sample_entity() -> IntellectualEntity {
        let mut entity = IntellectualEntity::new(
            Identifier::new("local", "obj-42"),
            DescriptiveMetadata::DublinCore(DcMetadata {
                titles: vec!["Maps & Charts".to_string()],
                dates: vec![Utc.with_ymd_and_hms(2012, 5, 3, 8, 30, 0).unwrap()],
                creators: vec![Agent::named("Alice").with_role(AgentRole::Creator)],
                ..DcMetadata::default()
            }),
        );
        entity.representations.push(Representation {
            title: None,
            provenance: ProvenanceMetadata::Premis(PremisProvenance {
                events: vec![Event {
                    identifier: "ev-1".to_string(),
                    event_type: "ingest".to_string(),
                    date_time: None,
                    detail: None,
                    linking_agents: vec![Agent::named("Ingest Bot")],
                }],
            }),
            technical: RawMetadata::new(MetadataDialect::TextMd, "<textmd:textMD/>"),
            files: vec![File::at("file:///data/a.txt")],
        });
        entity
    }

    #[test]
    fn sections_appear_in_document_order() {
        let xml = render(&sample_entity(), WriterConfig::default());
        let positions: Vec<usize> = [
            "<mets:dmdSec",
            "<mets:amdSec",
            "<mets:fileSec",
            "<mets:structMap",
            "<mets:metsHdr",
        ]
        .iter()
        .map(|tag| xml.find(tag).unwrap_or_else(|| panic!("missing {tag}")))
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn escapes_text_and_embeds_raw_fragments() {
        let xml = render(&sample_entity(), WriterConfig::default());
        assert!(xml.contains("LABEL=\"Maps &amp; Charts\""));
        assert!(xml.contains("<dc:title>Maps &amp; Charts</dc:title>"));
        assert!(xml.contains("<textmd:textMD/>"));
        assert!(xml.contains("MDTYPE=\"TEXTMD\""));
        assert!(xml.contains("<dc:date>2012-05-03T08:30:00Z</dc:date>"));
        assert!(xml.contains("xlink:href=\"file:///data/a.txt\""));
        assert!(xml.contains(
            "<premis:linkingAgentIdentifierValue>Ingest Bot</premis:linkingAgentIdentifierValue>"
        ));
        assert!(xml.contains("ROLE=\"CREATOR\""));
        assert!(xml.contains("PROFILE=\"http://example.com/scape-mets-profile.xml\""));
    }

    #[test]
    fn compact_output_has_no_newlines_after_declaration() {
        let config = WriterConfig {
            indent: 0,
            ..WriterConfig::default()
        };
        let xml = render(&sample_entity(), config);
        let body = xml.split_once("?>").map(|(_, rest)| rest).unwrap_or("");
        assert!(!body.contains('\n'));
    }
}
