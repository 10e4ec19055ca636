//! Extension transparency
//!
//! A custom type that overrides nothing behaves exactly like its base type
//! through decode, validation and encoding. Overrides only change what
//! they name, and the framework rejects overrides that corrupt the wire
//! payload.

use crate::common::*;
use plugframe::{AttributePath, ConversionError, CustomType, DecodeError, Extension, StringValue};

#[derive(Debug)]
struct Hostname;

impl Extension for Hostname {
    fn name(&self) -> &str {
        "HostnameType"
    }
}

#[derive(Debug)]
struct StrictHostname;

impl Extension for StrictHostname {
    fn name(&self) -> &str {
        "StrictHostnameType"
    }

    fn validate(&self, base: &Type, wire: &WireValue, path: &AttributePath) -> Diagnostics {
        let mut diags = base.validate(wire, path);
        if let Ok(host) = wire.as_str() {
            if host.contains(char::is_whitespace) {
                diags.add_attribute_error(
                    path,
                    "Invalid Hostname",
                    format!("{:?} contains whitespace", host),
                );
            }
        }
        diags
    }
}

#[derive(Debug)]
struct CaseInsensitive;

impl Extension for CaseInsensitive {
    fn name(&self) -> &str {
        "CaseInsensitiveType"
    }

    fn value_equal(&self, base: &Value, other: &Value) -> bool {
        match (base.as_str(), other.as_str()) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => base.equal(other),
        }
    }
}

#[derive(Debug)]
struct Trimming;

impl Extension for Trimming {
    fn name(&self) -> &str {
        "TrimmingType"
    }

    fn value_from_wire(
        &self,
        _: &Type,
        _: &WireValue,
        decoded: Value,
    ) -> Result<Value, ConversionError> {
        Ok(match decoded.as_str() {
            Some(s) => Value::String(StringValue::new(s.trim())),
            None => decoded,
        })
    }
}

fn host_schema(host: Type) -> Schema {
    Schema::builder()
        .attribute("host", Attribute::leaf(host.clone()).required())
        .attribute("aliases", Attribute::list(host).optional())
        .build()
        .unwrap()
}

fn host_wire(host: &str, aliases: &[&str]) -> WireValue {
    WireValue::object([
        ("host", WireValue::string(host)),
        (
            "aliases",
            WireValue::list(
                WireType::String,
                aliases.iter().map(|a| WireValue::string(*a)).collect(),
            ),
        ),
    ])
}

#[test]
fn plain_extension_matches_its_base() {
    let base = host_schema(Type::String);
    let custom = host_schema(Type::Custom(CustomType::new(Type::String, Hostname)));
    assert_eq!(base.ty(), custom.ty());

    let wire = host_wire("example.com", &["www.example.com"]);
    let from_base = decode(&base, &wire, &DecodeConfig::default()).unwrap();
    let from_custom = decode(&custom, &wire, &DecodeConfig::default()).unwrap();
    assert_eq!(from_base.value, from_custom.value);
    assert_eq!(from_custom.value.to_wire(), wire);
    assert!(from_custom.diagnostics.is_empty());

    let bad = WireValue::object([
        ("host", WireValue::null(WireType::String)),
        ("aliases", WireValue::null(WireType::list(WireType::String))),
    ]);
    assert_eq!(
        validate(&base, &bad, &DecodeConfig::default()),
        validate(&custom, &bad, &DecodeConfig::default())
    );
}

#[test]
fn validate_override_adds_to_base_checks() {
    let schema = host_schema(Type::Custom(CustomType::new(Type::String, StrictHostname)));
    let wire = host_wire("bad host", &["ok", "also bad"]);

    let diags = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(paths(&diags), vec!["aliases[1]", "host"]);
    assert!(summaries(&diags).iter().all(|s| s == "Invalid Hostname"));
}

#[test]
fn equality_override_drives_set_uniqueness() {
    let ci = Type::Custom(CustomType::new(Type::String, CaseInsensitive));
    let schema = Schema::builder()
        .attribute("zones", Attribute::set(ci).required())
        .build()
        .unwrap();
    let wire = WireValue::object([(
        "zones",
        WireValue::set(
            WireType::String,
            vec![WireValue::string("EU"), WireValue::string("us"), WireValue::string("eu")],
        ),
    )]);

    let diags = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(summaries(&diags), vec!["Duplicate Set Element"]);

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    let zones = decoded.value.as_object().unwrap().get("zones").unwrap();
    assert_eq!(zones.as_set().unwrap().elements().unwrap().len(), 2);
}

#[test]
fn payload_altering_override_is_fatal() {
    let schema = host_schema(Type::Custom(CustomType::new(Type::String, Trimming)));

    let clean = host_wire("example.com", &[]);
    assert!(decode(&schema, &clean, &DecodeConfig::default()).is_ok());

    let padded = host_wire("  example.com ", &[]);
    let err = decode(&schema, &padded, &DecodeConfig::default()).unwrap_err();
    match err {
        DecodeError::Structural { path, source } => {
            assert_eq!(path.to_string(), "host");
            assert!(matches!(source, ConversionError::PayloadAltered(name) if name == "TrimmingType"));
        }
        other => panic!("expected a structural error, got {:?}", other),
    }
}
