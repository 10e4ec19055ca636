//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;

pub use plugframe::{
    decode, validate, Attribute, AttributePath, Block, DecodeConfig, Decoded, Diagnostic,
    Diagnostics, NestedObject, NestingMode, Number, Schema, Severity, Type, Value, WireType,
    WireValue,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

// ============================================================================
// Wire helpers
// ============================================================================

/// Number wire value from decimal text
pub fn num(text: &str) -> WireValue {
    WireValue::number(text.parse::<Number>().expect("valid number literal"))
}

/// Null number wire value
pub fn null_num() -> WireValue {
    WireValue::null(WireType::Number)
}

/// Rendered paths of every diagnostic, in report order
pub fn paths(diags: &Diagnostics) -> Vec<String> {
    diags
        .iter()
        .map(|d| d.path.as_ref().map(ToString::to_string).unwrap_or_default())
        .collect()
}

/// Summaries of every diagnostic, in report order
pub fn summaries(diags: &Diagnostics) -> Vec<String> {
    diags.iter().map(|d| d.summary.clone()).collect()
}

// ============================================================================
// Firewall fixture
// ============================================================================

/// Nested object of a `rule` block
pub fn rule_object() -> NestedObject {
    NestedObject::builder()
        .attribute("port", Attribute::int64().required())
        .attribute("weight", Attribute::float64().optional())
        .attribute("protocol", Attribute::string().optional())
        .build()
        .expect("valid rule object")
}

/// Wire type of one `rule` element
pub fn rule_type() -> WireType {
    rule_object().ty().wire_type()
}

/// Firewall resource schema used across suites
pub fn firewall_schema() -> Schema {
    Schema::builder()
        .version(1)
        .description("Firewall with ordered rules")
        .attribute("name", Attribute::string().required())
        .attribute("tags", Attribute::set(Type::String).optional())
        .attribute("labels", Attribute::map(Type::String).optional())
        .attribute("id", Attribute::string().computed())
        .block("rule", Block::list(rule_object()))
        .build()
        .expect("valid firewall schema")
}

/// One `rule` element
pub fn rule(port: WireValue, weight: WireValue) -> WireValue {
    WireValue::object([
        ("port", port),
        ("weight", weight),
        ("protocol", WireValue::string("tcp")),
    ])
}

/// Firewall configuration payload
pub fn firewall(name: WireValue, tags: Vec<WireValue>, rules: Vec<WireValue>) -> WireValue {
    WireValue::object([
        ("name", name),
        ("tags", WireValue::set(WireType::String, tags)),
        ("labels", WireValue::null(WireType::map(WireType::String))),
        ("id", WireValue::unknown(WireType::String)),
        ("rule", WireValue::list(rule_type(), rules)),
    ])
}
