//! JSON bridge
//!
//! Configuration arriving as JSON decodes through the schema's wire type,
//! with numbers kept exact and absent attributes read as null.

use crate::common::*;
use serde_json::json;

fn wire_from_json(json: serde_json::Value) -> WireValue {
    WireValue::from_json(&json, &firewall_schema().ty().wire_type()).unwrap()
}

#[test]
fn json_config_decodes_against_the_schema() {
    init_tracing();
    let wire = wire_from_json(json!({
        "name": "fw",
        "tags": ["edge"],
        "rule": [
            {"port": 443, "weight": 0.5, "protocol": "tcp"},
            {"port": 22}
        ]
    }));

    let decoded = decode(&firewall_schema(), &wire, &DecodeConfig::default()).unwrap();
    assert!(decoded.diagnostics.is_empty());
    let root = decoded.value.as_object().unwrap();
    assert!(root.get("labels").unwrap().is_null());
    assert!(root.get("id").unwrap().is_null());
    let rules = root.get("rule").unwrap().as_list().unwrap().elements().unwrap();
    assert_eq!(rules.len(), 2);
    assert!(rules[1].as_object().unwrap().get("weight").unwrap().is_null());
}

#[test]
fn json_numbers_keep_every_digit() {
    let wire = wire_from_json(json!({
        "name": "fw",
        "rule": [{"port": 12345678901234567890u64}]
    }));
    let diags = validate(&firewall_schema(), &wire, &DecodeConfig::default());
    assert_eq!(paths(&diags), vec!["rule[0].port"]);
    assert_eq!(
        diags.iter().next().unwrap().detail,
        "Value 12345678901234567890 cannot be represented as a 64-bit integer."
    );
}

#[test]
fn json_shape_errors_are_reported_before_decoding() {
    let err = WireValue::from_json(
        &json!({"name": "fw", "rule": {"port": 1}}),
        &firewall_schema().ty().wire_type(),
    );
    assert!(err.is_err());

    let err = WireValue::from_json(
        &json!({"name": "fw", "owner": "ops"}),
        &firewall_schema().ty().wire_type(),
    );
    assert!(err.is_err());
}

#[test]
fn decoded_values_encode_back_to_json() {
    let original = json!({
        "name": "fw",
        "tags": ["a", "b"],
        "labels": {"env": "prod"},
        "id": "fw-1",
        "rule": [{"port": 80, "weight": 1.5e300, "protocol": null}]
    });
    let wire = wire_from_json(original.clone());
    let decoded = decode(&firewall_schema(), &wire, &DecodeConfig::default()).unwrap();
    let encoded = decoded.value.to_wire().to_json().unwrap();
    assert_eq!(encoded["labels"], original["labels"]);
    assert_eq!(encoded["tags"], original["tags"]);
    assert_eq!(encoded["rule"][0]["port"], json!(80));
    assert!(encoded["rule"][0]["protocol"].is_null());
}

#[test]
fn unknown_values_have_no_json_form() {
    let wire = firewall(WireValue::string("fw"), vec![], vec![]);
    assert!(wire.to_json().is_err());
}
