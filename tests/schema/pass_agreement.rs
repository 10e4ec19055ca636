//! Pass agreement
//!
//! On payloads with user-level problems, decoding and the validation pass
//! attribute those problems to the same paths. Decoding may also drop
//! repeated set elements, but it never drops an element validation keeps.

use crate::common::*;
use proptest::prelude::*;

fn member_object() -> NestedObject {
    NestedObject::builder()
        .attribute("port", Attribute::int64().optional())
        .attribute("weight", Attribute::float64().optional())
        .build()
        .unwrap()
}

fn member_type() -> WireType {
    WireType::object([("port", WireType::Number), ("weight", WireType::Number)])
}

fn pool_schema() -> Schema {
    Schema::builder()
        .attribute("tags", Attribute::set(Type::String).optional())
        .attribute("groups", Attribute::list(Type::set(Type::String)).optional())
        .block("pool", Block::set(member_object()))
        .block("route", Block::list(member_object()))
        .build()
        .unwrap()
}

fn port_strategy() -> impl Strategy<Value = WireValue> {
    prop_oneof![
        Just(null_num()),
        (0i64..4).prop_map(|p| WireValue::number(p)),
        (0i64..4).prop_map(|p| num(&format!("{}.5", p))),
    ]
}

fn weight_strategy() -> impl Strategy<Value = WireValue> {
    prop_oneof![
        Just(null_num()),
        Just(num("0.25")),
        Just(num("0.1")),
        Just(num("1e400")),
    ]
}

fn member_strategy() -> impl Strategy<Value = WireValue> {
    (port_strategy(), weight_strategy())
        .prop_map(|(port, weight)| WireValue::object([("port", port), ("weight", weight)]))
}

fn strings(items: Vec<String>) -> WireValue {
    WireValue::set(
        WireType::String,
        items.into_iter().map(WireValue::string).collect(),
    )
}

fn pool_strategy() -> impl Strategy<Value = WireValue> {
    (
        prop::collection::vec("[abc]", 0..4),
        prop::collection::vec(prop::collection::vec("[ab]", 0..3), 0..3),
        prop::collection::vec(member_strategy(), 0..5),
        prop::collection::vec(member_strategy(), 0..4),
    )
        .prop_map(|(tags, groups, pool, route)| {
            WireValue::object([
                ("tags", strings(tags)),
                (
                    "groups",
                    WireValue::list(
                        WireType::set(WireType::String),
                        groups.into_iter().map(strings).collect(),
                    ),
                ),
                ("pool", WireValue::set(member_type(), pool)),
                ("route", WireValue::list(member_type(), route)),
            ])
        })
}

fn sorted_paths(diags: &Diagnostics) -> Vec<String> {
    let mut paths = paths(diags);
    paths.sort();
    paths.dedup();
    paths
}

proptest! {
    #[test]
    fn decode_and_validate_blame_the_same_paths(wire in pool_strategy()) {
        let schema = pool_schema();
        let config = DecodeConfig::default();
        let decoded = decode(&schema, &wire, &config);
        prop_assert!(decoded.is_ok(), "{:?}", decoded);
        let decoded = decoded.unwrap();
        let validated = validate(&schema, &wire, &config);

        prop_assert_eq!(sorted_paths(&decoded.diagnostics), sorted_paths(&validated));
        prop_assert_eq!(decoded.has_error(), validated.has_error());
    }

    #[test]
    fn set_blocks_lose_only_repeats(wire in pool_strategy()) {
        let decoded = decode(&pool_schema(), &wire, &DecodeConfig::default()).unwrap();
        let repeats = decoded
            .diagnostics
            .iter()
            .filter(|d| d.summary == "Duplicate Set Element")
            .filter(|d| d.path.as_ref().is_some_and(|p| p.to_string().starts_with("pool[")))
            .count();
        let sent = wire.as_entries().unwrap()["pool"].as_elements().unwrap().len();
        let kept = decoded.value.as_object().unwrap().get("pool").unwrap();
        let kept = kept.as_set().unwrap().elements().unwrap().len();
        prop_assert_eq!(kept, wire_distinct(&wire));
        prop_assert_eq!(repeats > 0, kept < sent);
    }
}

fn wire_distinct(wire: &WireValue) -> usize {
    let elems = wire.as_entries().unwrap()["pool"].as_elements().unwrap();
    let mut distinct: Vec<&WireValue> = Vec::new();
    for elem in elems {
        if !distinct.contains(&elem) {
            distinct.push(elem);
        }
    }
    distinct.len()
}

#[test]
fn repeated_broken_members_are_reported_once_each_way() {
    let member = |port: &str| WireValue::object([("port", num(port)), ("weight", null_num())]);
    let wire = WireValue::object([
        ("tags", WireValue::null(WireType::set(WireType::String))),
        ("groups", WireValue::null(WireType::list(WireType::set(WireType::String)))),
        (
            "pool",
            WireValue::set(
                member_type(),
                vec![member("1.5"), member("2.5"), member("1.5")],
            ),
        ),
        ("route", WireValue::list(member_type(), vec![])),
    ]);

    let decoded = decode(&pool_schema(), &wire, &DecodeConfig::default()).unwrap();
    let validated = validate(&pool_schema(), &wire, &DecodeConfig::default());
    assert_eq!(sorted_paths(&decoded.diagnostics), sorted_paths(&validated));
    assert_eq!(validated.len(), 3);
    let pool = decoded.value.as_object().unwrap().get("pool").unwrap();
    assert_eq!(pool.as_set().unwrap().elements().unwrap().len(), 2);
}
