//! Integration tests for record normalization
//!
//! Drives the public API the way the sync module does: a record fetched with
//! its sub-objects expanded, plus the REST path it came from.

use serde_json::{json, Value};
use std::sync::Arc;
use syncnorm::core::attribute::{
    AttributeTypeDescriptor, AttributeTypeResolver, FormatCapabilities, InMemoryResolver,
};
use syncnorm::core::normalize::{Normalizer, RuleRegistry};
use syncnorm::domain::{AttributeTypeUuid, NormalizerError, Result};

const WS_REST_V1: &str = "/ws/rest/v1/";
const CONCEPT_UUID: &str = "some-concept-uuid";
const CIVIL_STATUS_TYPE: &str = "a0f5521c-dbbd-4c10-81b2-1b7ab18330df";
const PERSONAL_DOCTOR_TYPE: &str = "5f3c4e1a-8b2d-4c6e-9a7f-1d2e3f4a5b6c";

fn resolver() -> InMemoryResolver {
    InMemoryResolver::new()
        .with(
            AttributeTypeDescriptor::new(
                AttributeTypeUuid::new(CIVIL_STATUS_TYPE).unwrap(),
                "org.openmrs.Concept",
            )
            .with_name("Civil Status"),
        )
        .with(
            AttributeTypeDescriptor::new(
                AttributeTypeUuid::new(PERSONAL_DOCTOR_TYPE).unwrap(),
                "org.openmrs.Provider",
            )
            .with_name("Personal Doctor"),
        )
}

fn normalizer() -> Normalizer {
    Normalizer::builder().resolver(Arc::new(resolver())).build()
}

fn convert(resource: &str, record: &mut Value) {
    normalizer()
        .convert_path(&format!("{WS_REST_V1}{resource}"), record)
        .unwrap();
}

fn obs() -> Value {
    json!({
        "uuid": "some-uuid",
        "concept": {"uuid": CONCEPT_UUID, "display": "WEIGHT (KG)"}
    })
}

fn person() -> Value {
    json!({
        "uuid": "some-person-uuid",
        "attributes": [
            {
                "attributeType": CIVIL_STATUS_TYPE,
                "value": {"uuid": "32d3611a-6699-4d52-823f-b4b788bac3e3"}
            },
            {
                "attributeType": {"uuid": PERSONAL_DOCTOR_TYPE},
                "value": {"uuid": "c2299800-cca9-11e0-9572-0800200c9a66"}
            }
        ]
    })
}

fn encounter() -> Value {
    json!({
        "uuid": "i-just-made-this-up-now-uuid",
        "encounterDatetime": "2024-03-01T10:15:00.000+0000",
        "location": {
            "uuid": "some-location-uuid-doesnt-matter",
            "display": "Azure",
            "tags": [{"uuid": "some-location-tag-uuid", "display": "Philips"}]
        },
        "encounterType": {"uuid": "made-up-encounter-type-random-uuid", "display": "SAMPLE"},
        "patient": {"uuid": "can-this-be-patient-uuid"}
    })
}

#[test]
fn test_obs_concept_collapses_to_uuid() {
    let mut record = obs();
    convert("obs", &mut record);
    assert_eq!(record["concept"], CONCEPT_UUID);
}

#[test]
fn test_obs_encounter_is_not_invented() {
    let mut record = obs();
    convert("obs", &mut record);
    assert!(record.get("encounter").is_none());
}

#[test]
fn test_obs_encounter_collapses_to_uuid() {
    let mut record = obs();
    record["encounter"] = json!({"uuid": "some-encounter-uuid"});
    convert("obs", &mut record);
    assert_eq!(record["encounter"], "some-encounter-uuid");
}

#[test]
fn test_visit_encounters_are_removed() {
    let mut record = json!({"uuid": "some-visit-uuid", "encounters": []});
    convert("visit", &mut record);
    assert!(record.get("encounters").is_none());
    assert_eq!(record["uuid"], "some-visit-uuid");
}

#[test]
fn test_encounter_location_tags_are_removed() {
    let mut record = encounter();
    convert("encounter", &mut record);

    let location = &record["location"];
    assert_eq!(location["uuid"], "some-location-uuid-doesnt-matter");
    assert!(location.get("tags").is_none());
}

#[test]
fn test_person_attributes_collapse_by_format() {
    let mut record = person();
    convert("person", &mut record);

    let uuids: Vec<&str> = record["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|attribute| attribute["value"].as_str())
        .collect();

    // Provider-typed values must keep their full object
    assert_eq!(uuids, vec!["32d3611a-6699-4d52-823f-b4b788bac3e3"]);
    assert_eq!(
        record["attributes"][1]["value"],
        json!({"uuid": "c2299800-cca9-11e0-9572-0800200c9a66"})
    );
}

#[test]
fn test_conversion_is_idempotent() {
    let normalizer = normalizer();
    for (resource, fixture) in [
        ("obs", obs()),
        ("person", person()),
        ("visit", json!({"uuid": "v", "encounters": [{"uuid": "e"}]})),
        ("encounter", encounter()),
    ] {
        let mut once = fixture;
        normalizer.convert(resource, &mut once).unwrap();

        let mut twice = once.clone();
        let outcome = normalizer.convert(resource, &mut twice).unwrap();

        assert_eq!(once, twice, "second {resource} conversion changed the record");
        assert!(outcome.is_unchanged());
    }
}

#[test]
fn test_unknown_resource_type_is_untouched() {
    let mut record = encounter();
    let original = record.clone();

    let outcome = normalizer()
        .convert_path("/ws/rest/v1/location", &mut record)
        .unwrap();

    assert_eq!(record, original);
    assert!(!outcome.rule_applied);
}

#[test]
fn test_field_order_is_preserved() {
    let mut record = json!({
        "uuid": "o-1",
        "person": {"uuid": "p-1"},
        "concept": {"uuid": "c-1"},
        "obsDatetime": "2024-03-01T10:15:00.000+0000",
        "encounter": {"uuid": "e-1"},
        "value": 72.5
    });
    convert("obs", &mut record);

    let keys: Vec<&str> = record
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["uuid", "person", "concept", "obsDatetime", "encounter", "value"]
    );
    // Fields not named by the rule stay nested
    assert_eq!(record["person"], json!({"uuid": "p-1"}));
}

#[test]
fn test_top_level_array_is_a_hard_error() {
    let mut record = json!([obs()]);
    let err = normalizer().convert("obs", &mut record).unwrap_err();
    assert!(matches!(err, NormalizerError::MalformedRecord(_)));
}

struct Offline;

impl AttributeTypeResolver for Offline {
    fn resolve(&self, uuid: &str) -> Result<Option<AttributeTypeDescriptor>> {
        Err(NormalizerError::attribute_type(uuid, "metadata service unreachable"))
    }
}

#[test]
fn test_person_with_unreachable_metadata_is_sent_as_received() {
    let normalizer = Normalizer::builder().resolver(Arc::new(Offline)).build();
    let mut record = person();

    let outcome = normalizer.convert("person", &mut record).unwrap();

    assert_eq!(record, person());
    assert_eq!(outcome.unresolved_attributes, 2);
}

#[test]
fn test_custom_rule_and_capability_table() {
    let mut registry = RuleRegistry::with_defaults();
    registry
        .register_fn("patient", |record, _ctx, outcome| {
            if syncnorm::core::normalize::shape::collapse_field(record, "person") {
                outcome.record_collapsed();
            }
        })
        .unwrap();

    let normalizer = Normalizer::builder()
        .registry(registry)
        .resolver(Arc::new(resolver()))
        .formats(FormatCapabilities::empty())
        .build();

    let mut patient = json!({"person": {"uuid": "p-1"}, "identifiers": []});
    normalizer.convert("patient", &mut patient).unwrap();
    assert_eq!(patient["person"], "p-1");

    // With an empty capability table nothing collapses, not even concepts
    let mut record = person();
    normalizer.convert("person", &mut record).unwrap();
    assert_eq!(record, person());
}

#[test]
fn test_batch_conversion_matches_single_conversion() {
    let normalizer = normalizer();

    let mut batch = vec![person(), person()];
    let summary = normalizer.convert_batch("person", &mut batch);

    let mut single = person();
    normalizer.convert("person", &mut single).unwrap();

    assert!(summary.is_complete());
    assert_eq!(summary.fields_collapsed, 2);
    assert_eq!(batch[0], single);
    assert_eq!(batch[1], single);
}
