//! Round trip
//!
//! For any payload that conforms to a schema, decoding and re-encoding
//! reproduces the payload exactly, and the validation pass finds nothing.

use crate::common::*;
use proptest::prelude::*;

fn weight_strategy() -> impl Strategy<Value = WireValue> {
    prop_oneof![
        Just(null_num()),
        any::<f64>()
            .prop_filter("finite", |x| x.is_finite())
            .prop_map(|x| WireValue::number(Number::from_f64(x).unwrap())),
    ]
}

fn rule_strategy() -> impl Strategy<Value = WireValue> {
    (any::<i64>(), weight_strategy())
        .prop_map(|(port, weight)| rule(WireValue::number(port), weight))
}

fn firewall_strategy() -> impl Strategy<Value = WireValue> {
    (
        "[a-z][a-z0-9-]{0,15}",
        prop::collection::btree_set("[a-z]{1,6}", 0..5),
        prop::collection::vec(rule_strategy(), 0..6),
    )
        .prop_map(|(name, tags, rules)| {
            firewall(
                WireValue::string(name),
                tags.into_iter().map(WireValue::string).collect(),
                rules,
            )
        })
}

proptest! {
    #[test]
    fn decode_then_encode_is_identity(wire in firewall_strategy()) {
        let schema = firewall_schema();
        let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
        prop_assert!(decoded.diagnostics.is_empty());
        prop_assert_eq!(decoded.value.to_wire(), wire);
    }

    #[test]
    fn conforming_payloads_validate_clean(wire in firewall_strategy()) {
        let diags = validate(&firewall_schema(), &wire, &DecodeConfig::default());
        prop_assert!(diags.is_empty(), "{:?}", diags);
    }

    #[test]
    fn json_round_trip_preserves_known_payloads(wire in firewall_strategy()) {
        let schema = firewall_schema();
        let ty = schema.ty().wire_type();
        let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
        // the computed id is unknown in configuration; state carries it known
        let state = WireValue::object([
            ("name", WireValue::string("fw")),
            ("tags", WireValue::null(WireType::set(WireType::String))),
            ("labels", WireValue::null(WireType::map(WireType::String))),
            ("id", WireValue::string("fw-0001")),
            ("rule", decoded.value.to_wire().as_entries().unwrap()["rule"].clone()),
        ]);
        let json = state.to_json().unwrap();
        prop_assert_eq!(WireValue::from_json(&json, &ty).unwrap(), state);
    }
}
