//! Schema declaration rules and planning hooks
//!
//! Invalid schemas are rejected when built, with an error naming the
//! offending node. Valid schemas expose their hooks for planning.

use crate::common::*;
use plugframe::{
    apply_plan_modifiers, resolve_default, SchemaError, StaticDefault, StringValue,
    UseStateForUnknown,
};

#[test]
fn flag_conflicts_are_rejected_at_build() {
    let err = Schema::builder()
        .attribute("id", Attribute::string().required().computed())
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "attribute \"id\" cannot be both Required and Computed"
    );

    let err = Schema::builder()
        .attribute("id", Attribute::string())
        .build()
        .unwrap_err();
    assert_eq!(err, SchemaError::MissingFlags("id".into()));
}

#[test]
fn nested_errors_surface_from_the_root_builder() {
    let inner = NestedObject::builder()
        .attribute("Port", Attribute::int64().required())
        .build();
    assert!(matches!(inner, Err(SchemaError::InvalidName { ref name, .. }) if name == "Port"));

    let rule = NestedObject::builder()
        .attribute("port", Attribute::int64().required())
        .build()
        .unwrap();
    let err = Schema::builder()
        .attribute("rule", Attribute::string().optional())
        .block("rule", Block::list(rule.clone()))
        .build()
        .unwrap_err();
    assert_eq!(err, SchemaError::DuplicateName("rule".into()));

    let err = Schema::builder()
        .block("rule", Block::list(rule).min_items(3).max_items(1))
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidItemBounds { min: 3, max: 1, .. }));
}

#[test]
fn defaults_need_computed_attributes() {
    let err = Schema::builder()
        .attribute(
            "protocol",
            Attribute::string()
                .optional()
                .default_value(StaticDefault::new(StringValue::new("tcp"))),
        )
        .build()
        .unwrap_err();
    assert_eq!(err, SchemaError::DefaultRequiresComputed("protocol".into()));
}

#[test]
fn planning_applies_default_then_modifiers() {
    let schema = Schema::builder()
        .attribute(
            "protocol",
            Attribute::string()
                .optional()
                .computed()
                .default_value(StaticDefault::new(StringValue::new("tcp"))),
        )
        .attribute(
            "id",
            Attribute::string()
                .computed()
                .plan_modifier(UseStateForUnknown),
        )
        .build()
        .unwrap();
    let mut diags = Diagnostics::new();

    let protocol_path = AttributePath::root().attribute("protocol");
    let protocol = schema.attribute_at_path(&protocol_path).unwrap();
    let null = Type::String.null_value();
    let planned = resolve_default(protocol, &protocol_path, &null, &mut diags);
    assert_eq!(planned.as_str(), Some("tcp"));

    let id_path = AttributePath::root().attribute("id");
    let id = schema.attribute_at_path(&id_path).unwrap();
    let state = Value::String(StringValue::new("fw-0001"));
    let planned = apply_plan_modifiers(
        id,
        &id_path,
        &null,
        &state,
        Type::String.unknown_value(),
        &mut diags,
    );
    assert_eq!(planned, state);
    assert!(diags.is_empty());
}

#[test]
fn schema_metadata_is_exposed() {
    let schema = firewall_schema();
    assert_eq!(schema.version(), 1);
    assert_eq!(schema.description(), Some("Firewall with ordered rules"));
    let id = schema
        .attribute_at_path(&AttributePath::root().attribute("id"))
        .unwrap();
    assert!(id.is_computed() && !id.is_required());
    assert_eq!(
        schema.type_at_path(&AttributePath::root().block("rule").index(0).attribute("weight")),
        Some(Type::Float64)
    );
}
