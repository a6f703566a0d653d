use mets_core::{
    Agent, AgentRole, AgentType, DescriptiveMetadata, IntellectualEntity, MetadataDialect,
    ProvenanceMetadata,
};

#[test]
fn agent_uses_mets_vocabulary_on_the_wire() {
    let agent = Agent::named("National Archive")
        .with_role(AgentRole::IpOwner)
        .with_type(AgentType::Organization)
        .with_note("rights holder");

    let json = serde_json::to_value(&agent).unwrap();
    assert_eq!(json["name"], "National Archive");
    assert_eq!(json["role"], "IPOWNER");
    assert_eq!(json["type"], "ORGANIZATION");
    assert_eq!(json["note"], "rights holder");
    assert!(json["other_role"].is_null());

    let decoded: Agent = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, agent);
}

#[test]
fn entity_deserializes_from_pipeline_json() {
    let value = serde_json::json!({
        "identifier": { "type": "local", "value": "obj-99" },
        "descriptive": {
            "variant": "dublin_core",
            "titles": ["Field Notes"],
            "dates": ["1998-04-12T00:00:00Z"],
            "creators": [{
                "name": "R. Smith",
                "role": "CREATOR",
                "other_role": null,
                "type": "INDIVIDUAL",
                "other_type": null,
                "note": null
            }]
        },
        "representations": [{
            "title": "scan",
            "provenance": { "variant": "premis", "events": [] },
            "technical": { "dialect": "niso_mix", "xml": "<mix:mix/>" },
            "files": [{ "uris": ["file:///notes-1.tif"] }]
        }]
    });

    let entity: IntellectualEntity = serde_json::from_value(value).unwrap();
    assert_eq!(entity.identifier.value, "obj-99");
    assert!(entity.alternative_identifiers.is_empty());
    assert_eq!(entity.file_count(), 1);
    match &entity.descriptive {
        DescriptiveMetadata::DublinCore(dc) => {
            assert_eq!(dc.titles, ["Field Notes"]);
            assert_eq!(dc.creators[0].agent_type, Some(AgentType::Individual));
            assert!(dc.contributors.is_empty());
        }
        other => panic!("unexpected descriptive variant: {other:?}"),
    }
    let representation = &entity.representations[0];
    assert_eq!(representation.technical.dialect, MetadataDialect::NisoMix);
    assert!(matches!(
        representation.provenance,
        ProvenanceMetadata::Premis(ref premis) if premis.events.is_empty()
    ));
}

#[test]
fn unknown_descriptive_variant_is_rejected() {
    let value = serde_json::json!({
        "identifier": { "type": "local", "value": "obj-1" },
        "descriptive": { "variant": "marc", "xml": "<record/>" }
    });
    assert!(serde_json::from_value::<IntellectualEntity>(value).is_err());
}
