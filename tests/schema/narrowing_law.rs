//! Numeric narrowing
//!
//! A number narrows to Float64 only if no precision is lost, and to Int64
//! only if it is integral and in range. Failures are user-level: decode
//! reports a diagnostic and continues, validate reports the same location.

use crate::common::*;
use plugframe::{Float64Value, Int64Value};

const HUGE: &str = "1.797693134862315708145274237317043567981e+1000";

fn weight_of(decoded: &Decoded, index: usize) -> Value {
    let rules = decoded.value.as_object().unwrap().get("rule").unwrap();
    let rule = &rules.as_list().unwrap().elements().unwrap()[index];
    rule.as_object().unwrap().get("weight").unwrap().clone()
}

#[test]
fn exact_decimals_narrow_to_float64() {
    init_tracing();
    let schema = firewall_schema();
    let wire = firewall(
        WireValue::string("fw"),
        vec![],
        vec![rule(num("443"), num("0.1")), rule(num("80"), num("2.5e-3"))],
    );

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
    assert_eq!(
        weight_of(&decoded, 0),
        Value::Float64(Float64Value::new(0.1).unwrap())
    );
    assert_eq!(
        weight_of(&decoded, 1),
        Value::Float64(Float64Value::new(0.0025).unwrap())
    );
}

#[test]
fn out_of_range_float_is_a_diagnostic_not_a_failure() {
    let schema = firewall_schema();
    let wire = firewall(
        WireValue::string("fw"),
        vec![],
        vec![rule(num("443"), num("1")), rule(num("80"), num(HUGE))],
    );

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    assert_eq!(paths(&decoded.diagnostics), vec!["rule[1].weight"]);
    let d = decoded.diagnostics.iter().next().unwrap();
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(
        d.detail,
        "Value 1.797693134862315708145274237317043567981e+1000 cannot be represented as a 64-bit floating point."
    );
    assert!(weight_of(&decoded, 1).is_null());
    assert!(!weight_of(&decoded, 0).is_null());
}

#[test]
fn excess_digits_do_not_narrow() {
    let schema = firewall_schema();
    let wire = firewall(
        WireValue::string("fw"),
        vec![],
        vec![rule(num("443"), num("0.1000000000000000000001"))],
    );
    let diags = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(paths(&diags), vec!["rule[0].weight"]);
    assert_eq!(summaries(&diags), vec!["Float64 Type Validation Error"]);
}

#[test]
fn int64_requires_integral_in_range_values() {
    let schema = firewall_schema();
    let wire = firewall(
        WireValue::string("fw"),
        vec![],
        vec![
            rule(num("9223372036854775807"), null_num()),
            rule(num("9223372036854775808"), null_num()),
            rule(num("8.5"), null_num()),
            rule(num("1.2e3"), null_num()),
        ],
    );

    let diags = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(paths(&diags), vec!["rule[1].port", "rule[2].port"]);
    assert!(diags
        .iter()
        .all(|d| d.detail.ends_with("cannot be represented as a 64-bit integer.")));

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    let rules = decoded.value.as_object().unwrap().get("rule").unwrap().clone();
    let ports: Vec<Value> = rules
        .as_list()
        .unwrap()
        .elements()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().get("port").unwrap().clone())
        .collect();
    assert_eq!(ports[0], Value::Int64(Int64Value::new(i64::MAX)));
    assert!(ports[1].is_null());
    assert!(ports[2].is_null());
    assert_eq!(ports[3], Value::Int64(Int64Value::new(1200)));
}

#[test]
fn decode_and_validate_agree_on_narrowing_locations() {
    let schema = firewall_schema();
    let wire = firewall(
        WireValue::string("fw"),
        vec![],
        vec![
            rule(num("1"), num("1e-400")),
            rule(num("2"), num("0.5")),
            rule(num("3.25"), num("7")),
        ],
    );

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    let validated = validate(&schema, &wire, &DecodeConfig::default());

    let conversion: Vec<String> = decoded
        .diagnostics
        .iter()
        .filter(|d| d.summary == "Value Conversion Error")
        .map(|d| d.path.as_ref().unwrap().to_string())
        .collect();
    let narrowing: Vec<String> = validated
        .iter()
        .filter(|d| d.summary.ends_with("Type Validation Error"))
        .map(|d| d.path.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(conversion, vec!["rule[0].weight", "rule[2].port"]);
    assert_eq!(conversion, narrowing);
}
