//! Set uniqueness
//!
//! Sets never hold two equal fully-known elements. Construction rejects
//! them outright; decoding a payload that carries them reports the
//! repeated value and keeps the first occurrences.

use crate::common::*;
use plugframe::{ListValue, ObjectType, ObjectValue, SetValue, StringValue, ValueError};
use std::collections::BTreeMap;

fn s(text: &str) -> Value {
    Value::String(StringValue::new(text))
}

#[test]
fn construction_rejects_duplicates() {
    let err = SetValue::new(Type::String, vec![s("a"), s("b"), s("a")]).unwrap_err();
    assert!(matches!(err, ValueError::DuplicateSetElement { index: 2, .. }));

    let ok = SetValue::new(Type::String, vec![s("a"), s("b")]).unwrap();
    assert_eq!(ok.elements().unwrap().len(), 2);
    assert!(ok.contains(&s("b")));
}

#[test]
fn deep_equality_applies_to_nested_elements() {
    let list = |items: &[&str]| {
        Value::List(ListValue::new(Type::String, items.iter().map(|t| s(t)).collect()).unwrap())
    };
    let err = SetValue::new(
        Type::list(Type::String),
        vec![list(&["x", "y"]), list(&["y", "x"]), list(&["x", "y"])],
    )
    .unwrap_err();
    assert!(matches!(err, ValueError::DuplicateSetElement { index: 2, .. }));
}

#[test]
fn unknown_elements_are_not_compared() {
    let ty = ObjectType::new([("id", Type::String)]);
    let obj = |id: Value| {
        let attrs = BTreeMap::from([("id".to_string(), id)]);
        Value::Object(ObjectValue::new(ty.clone(), attrs).unwrap())
    };
    let unknown = || obj(Type::String.unknown_value());
    let set = SetValue::new(Type::Object(ty.clone()), vec![unknown(), unknown()]);
    assert!(set.is_ok());
}

#[test]
fn decode_keeps_first_occurrences_and_reports_the_repeat() {
    let tags = vec![
        WireValue::string("web"),
        WireValue::string("db"),
        WireValue::string("web"),
        WireValue::string("web"),
    ];
    let wire = firewall(WireValue::string("fw"), tags, vec![rule(num("1"), null_num())]);

    let decoded = decode(&firewall_schema(), &wire, &DecodeConfig::default()).unwrap();
    assert_eq!(
        paths(&decoded.diagnostics),
        vec!["tags[Value(\"web\")]"]
    );
    assert_eq!(
        decoded.diagnostics.iter().next().unwrap().detail,
        "This attribute contains duplicate values of: \"web\""
    );
    let tags = decoded.value.as_object().unwrap().get("tags").unwrap();
    let kept: Vec<&str> = tags
        .as_set()
        .unwrap()
        .elements()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(kept, vec!["web", "db"]);
}

#[test]
fn validate_reports_duplicates_in_set_blocks() {
    let member = NestedObject::builder()
        .attribute("host", Attribute::string().required())
        .build()
        .unwrap();
    let schema = Schema::builder()
        .block("member", Block::set(member))
        .build()
        .unwrap();
    let host = |h: &str| WireValue::object([("host", WireValue::string(h))]);
    let wire = WireValue::object([(
        "member",
        WireValue::set(
            host("a").ty().clone(),
            vec![host("a"), host("b"), host("a")],
        ),
    )]);

    let diags = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(summaries(&diags), vec!["Duplicate Set Element"]);
    assert_eq!(paths(&diags), vec!["member[Value({\"host\":\"a\"})]"]);

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    let members = decoded.value.as_object().unwrap().get("member").unwrap();
    assert_eq!(members.as_set().unwrap().elements().unwrap().len(), 2);
    assert_eq!(decoded.diagnostics.len(), 1);
}

#[test]
fn recovered_set_block_elements_stay_distinct() {
    let member = NestedObject::builder()
        .attribute("port", Attribute::int64().optional())
        .build()
        .unwrap();
    let schema = Schema::builder()
        .block("member", Block::set(member))
        .build()
        .unwrap();
    let port = |p: &str| WireValue::object([("port", num(p))]);
    let wire = WireValue::object([(
        "member",
        WireValue::set(port("1").ty().clone(), vec![port("1.5"), port("2.5")]),
    )]);

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    assert_eq!(
        summaries(&decoded.diagnostics),
        vec!["Value Conversion Error", "Value Conversion Error"]
    );
    let members = decoded.value.as_object().unwrap().get("member").unwrap();
    assert_eq!(members.as_set().unwrap().elements().unwrap().len(), 2);

    let diags = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(diags.len(), 2);
    assert_eq!(paths(&decoded.diagnostics), paths(&diags));
    assert!(paths(&diags).iter().all(|p| p.starts_with("member[") && p.ends_with("].port")));
}

#[test]
fn set_block_repeats_are_found_on_the_wire() {
    let member = NestedObject::builder()
        .attribute("port", Attribute::int64().optional())
        .build()
        .unwrap();
    let schema = Schema::builder()
        .block("member", Block::set(member))
        .build()
        .unwrap();
    let port = |p: &str| WireValue::object([("port", num(p))]);
    let wire = WireValue::object([(
        "member",
        WireValue::set(
            port("1").ty().clone(),
            vec![port("1.5"), port("8"), port("1.5")],
        ),
    )]);

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    let validated = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(
        summaries(&decoded.diagnostics),
        vec!["Value Conversion Error", "Duplicate Set Element"]
    );
    assert_eq!(paths(&decoded.diagnostics), paths(&validated));
    let members = decoded.value.as_object().unwrap().get("member").unwrap();
    assert_eq!(members.as_set().unwrap().elements().unwrap().len(), 2);
}

#[test]
fn sets_inside_collections_keep_first_occurrences() {
    let schema = Schema::builder()
        .attribute("top", Attribute::set(Type::String).optional())
        .attribute("groups", Attribute::list(Type::set(Type::String)).optional())
        .build()
        .unwrap();
    let strings = |items: &[&str]| {
        WireValue::set(
            WireType::String,
            items.iter().map(|t| WireValue::string(*t)).collect(),
        )
    };
    let wire = WireValue::object([
        ("top", strings(&["a", "b", "a"])),
        (
            "groups",
            WireValue::list(
                WireType::set(WireType::String),
                vec![strings(&["c"]), strings(&["a", "b", "a"])],
            ),
        ),
    ]);

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    assert_eq!(
        paths(&decoded.diagnostics),
        vec!["groups[1][Value(\"a\")]", "top[Value(\"a\")]"]
    );
    assert!(summaries(&decoded.diagnostics)
        .iter()
        .all(|s| s == "Duplicate Set Element"));
    let validated = validate(&schema, &wire, &DecodeConfig::default());
    assert_eq!(paths(&decoded.diagnostics), paths(&validated));

    let root = decoded.value.as_object().unwrap();
    let groups = root.get("groups").unwrap().as_list().unwrap().elements().unwrap();
    assert_eq!(groups.len(), 2);
    let second = groups[1].as_set().unwrap();
    assert_eq!(second.elements().unwrap().len(), 2);
    assert!(second.contains(&s("a")) && second.contains(&s("b")));
    let top = root.get("top").unwrap().as_set().unwrap();
    assert_eq!(top.elements().unwrap().len(), 2);
}

#[test]
fn sets_inside_maps_and_objects_keep_first_occurrences() {
    let schema = Schema::builder()
        .attribute(
            "by_zone",
            Attribute::map(Type::object([("hosts", Type::set(Type::String))])).optional(),
        )
        .build()
        .unwrap();
    let hosts = |items: &[&str]| {
        WireValue::object([(
            "hosts",
            WireValue::set(
                WireType::String,
                items.iter().map(|t| WireValue::string(*t)).collect(),
            ),
        )])
    };
    let wire = WireValue::object([(
        "by_zone",
        WireValue::map(
            hosts(&[]).ty().clone(),
            [("east", hosts(&["x", "x"])), ("west", hosts(&["y"]))],
        ),
    )]);

    let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
    assert_eq!(
        paths(&decoded.diagnostics),
        vec!["by_zone[\"east\"].hosts[Value(\"x\")]"]
    );
    let zones = decoded.value.as_object().unwrap().get("by_zone").unwrap();
    assert!(!zones.is_null());
    assert_eq!(
        paths(&decoded.diagnostics),
        paths(&validate(&schema, &wire, &DecodeConfig::default()))
    );
}
