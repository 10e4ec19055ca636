//! Validation completeness
//!
//! The validation pass never stops at the first problem: N independent
//! invalid leaves produce N diagnostics.

use crate::common::*;
use plugframe::{NestedObject, OneOf};

#[test]
fn one_diagnostic_per_invalid_leaf() {
    for n in [1usize, 2, 5, 17] {
        let rules: Vec<WireValue> = (0..n)
            .map(|i| rule(num(&format!("{}.5", i)), num("1")))
            .collect();
        let wire = firewall(WireValue::string("fw"), vec![], rules);
        let diags = validate(&firewall_schema(), &wire, &DecodeConfig::default());
        assert_eq!(diags.len(), n);
        assert_eq!(diags.error_count(), n);
        let expected: Vec<String> = (0..n).map(|i| format!("rule[{}].port", i)).collect();
        assert_eq!(paths(&diags), expected);
    }
}

#[test]
fn independent_problem_kinds_are_all_reported() {
    let rule_object = NestedObject::builder()
        .attribute("port", Attribute::int64().required())
        .attribute(
            "protocol",
            Attribute::string()
                .optional()
                .validator(OneOf::new(["tcp", "udp"])),
        )
        .attribute("weight", Attribute::float64().optional())
        .build()
        .unwrap();
    let schema = Schema::builder()
        .attribute("name", Attribute::string().required())
        .attribute("tags", Attribute::set(Type::String).optional())
        .block("rule", Block::list(rule_object).max_items(1))
        .build()
        .unwrap();

    let bad_rule = WireValue::object([
        ("port", null_num()),
        ("protocol", WireValue::string("icmp")),
        ("weight", num("1e500")),
    ]);
    let wire = WireValue::object([
        ("name", WireValue::null(WireType::String)),
        (
            "tags",
            WireValue::set(
                WireType::String,
                vec![WireValue::string("a"), WireValue::string("a")],
            ),
        ),
        (
            "rule",
            WireValue::list(bad_rule.ty().clone(), vec![bad_rule.clone(), bad_rule]),
        ),
    ]);

    let diags = validate(&schema, &wire, &DecodeConfig::default());
    let mut found = summaries(&diags);
    found.sort();
    assert_eq!(
        found,
        vec![
            "Duplicate Set Element",
            "Float64 Type Validation Error",
            "Float64 Type Validation Error",
            "Invalid Attribute Value Match",
            "Invalid Attribute Value Match",
            "Missing Configuration for Required Attribute",
            "Missing Configuration for Required Attribute",
            "Missing Configuration for Required Attribute",
            "Too Many Blocks",
        ]
    );
}

#[test]
fn decode_collects_user_errors_alongside_a_value() {
    let wire = firewall(
        WireValue::null(WireType::String),
        vec![],
        vec![rule(num("1.5"), num("1")), rule(num("2.5"), num("1"))],
    );
    let decoded = decode(&firewall_schema(), &wire, &DecodeConfig::default()).unwrap();

    assert!(decoded.has_error());
    assert_eq!(
        paths(&decoded.diagnostics),
        vec![
            "name",
            "rule[0].port",
            "rule[0].port",
            "rule[1].port",
            "rule[1].port",
        ]
    );
    assert!(decoded.value.as_object().unwrap().get("name").unwrap().is_null());
}

#[test]
fn clean_configuration_has_no_diagnostics() {
    let wire = firewall(
        WireValue::string("fw"),
        vec![WireValue::string("edge"), WireValue::string("prod")],
        vec![rule(num("22"), null_num()), rule(num("443"), num("0.75"))],
    );
    assert!(validate(&firewall_schema(), &wire, &DecodeConfig::default()).is_empty());
    let decoded = decode(&firewall_schema(), &wire, &DecodeConfig::default()).unwrap();
    assert!(decoded.diagnostics.is_empty());
}
