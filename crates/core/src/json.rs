//! JSON bridge for wire values
//!
//! Converts between [`WireValue`] and `serde_json::Value`, guided by a
//! [`WireType`]. JSON carries no type information of its own, so decoding
//! always needs the expected wire type.
//!
//! | JSON | Wire type |
//! |------|-----------|
//! | `null` | null of any type |
//! | `true` / `false` | `Bool` |
//! | number | `Number` (exact; the `arbitrary_precision` feature keeps all digits) |
//! | string | `String` |
//! | array | `List`, `Set`, `Tuple` |
//! | object | `Map`, `Object` |
//!
//! Under `Dynamic` the concrete type is inferred from the JSON shape: arrays
//! become tuples and objects become objects. Unknown values have no JSON
//! form; encoding one fails with [`WireError::UnknownInJson`].
//!
//! # Limits
//!
//! | Limit | Value | Constant |
//! |-------|-------|----------|
//! | Max nesting depth | 128 levels | [`MAX_JSON_DEPTH`] |

use crate::error::WireError;
use crate::number::Number;
use crate::wire::{WireData, WireType, WireValue};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Maximum nesting depth accepted when decoding JSON
pub const MAX_JSON_DEPTH: usize = 128;

impl WireValue {
    /// Decode a JSON document as a wire value of type `ty`
    pub fn from_json(json: &Json, ty: &WireType) -> Result<WireValue, WireError> {
        from_json_impl(json, ty, 0)
    }

    /// Encode as JSON; fails if any nested value is unknown
    pub fn to_json(&self) -> Result<Json, WireError> {
        let json = match self.data() {
            WireData::Null => Json::Null,
            WireData::Unknown => return Err(WireError::UnknownInJson),
            WireData::Bool(b) => Json::Bool(*b),
            WireData::Number(n) => Json::Number(to_json_number(n, self.ty())?),
            WireData::String(s) => Json::String(s.clone()),
            WireData::List(elems) | WireData::Set(elems) | WireData::Tuple(elems) => Json::Array(
                elems
                    .iter()
                    .map(WireValue::to_json)
                    .collect::<Result<_, _>>()?,
            ),
            WireData::Map(entries) | WireData::Object(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                    .collect::<Result<_, WireError>>()?,
            ),
        };
        Ok(json)
    }
}

fn json_error(ty: &WireType, reason: impl Into<String>) -> WireError {
    WireError::Json {
        ty: ty.clone(),
        reason: reason.into(),
    }
}

fn json_shape(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn to_json_number(n: &Number, ty: &WireType) -> Result<serde_json::Number, WireError> {
    serde_json::Number::from_str(&n.to_string()).map_err(|e| json_error(ty, e.to_string()))
}

fn from_json_number(n: &serde_json::Number) -> Result<Number, WireError> {
    Ok(n.to_string().parse::<Number>()?)
}

fn from_json_impl(json: &Json, ty: &WireType, depth: usize) -> Result<WireValue, WireError> {
    if depth > MAX_JSON_DEPTH {
        return Err(json_error(
            ty,
            format!("nesting exceeds {} levels", MAX_JSON_DEPTH),
        ));
    }
    let mismatch = || json_error(ty, format!("unexpected JSON {}", json_shape(json)));

    match (ty, json) {
        (_, Json::Null) => Ok(WireValue::null(ty.clone())),
        (WireType::Dynamic, _) => {
            let inferred = infer_wire_type(json);
            from_json_impl(json, &inferred, depth)
        }
        (WireType::Bool, Json::Bool(b)) => Ok(WireValue::bool(*b)),
        (WireType::Number, Json::Number(n)) => Ok(WireValue::number(from_json_number(n)?)),
        (WireType::String, Json::String(s)) => Ok(WireValue::string(s.clone())),
        (WireType::List(e), Json::Array(items)) => {
            let elems = decode_items(items, e, depth)?;
            Ok(WireValue::new(ty.clone(), WireData::List(elems)))
        }
        (WireType::Set(e), Json::Array(items)) => {
            let elems = decode_items(items, e, depth)?;
            Ok(WireValue::new(ty.clone(), WireData::Set(elems)))
        }
        (WireType::Tuple(types), Json::Array(items)) => {
            if types.len() != items.len() {
                return Err(json_error(
                    ty,
                    format!("{} elements for {} positions", items.len(), types.len()),
                ));
            }
            let elems = types
                .iter()
                .zip(items)
                .map(|(t, item)| from_json_impl(item, t, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(WireValue::new(ty.clone(), WireData::Tuple(elems)))
        }
        (WireType::Map(e), Json::Object(fields)) => {
            let entries = fields
                .iter()
                .map(|(k, v)| Ok((k.clone(), from_json_impl(v, e, depth + 1)?)))
                .collect::<Result<BTreeMap<_, _>, WireError>>()?;
            Ok(WireValue::new(ty.clone(), WireData::Map(entries)))
        }
        (WireType::Object(attrs), Json::Object(fields)) => {
            if let Some(extra) = fields.keys().find(|k| !attrs.contains_key(*k)) {
                return Err(json_error(ty, format!("unsupported attribute {:?}", extra)));
            }
            let mut values = BTreeMap::new();
            for (name, attr_ty) in attrs {
                let value = match fields.get(name) {
                    Some(v) => from_json_impl(v, attr_ty, depth + 1)?,
                    None => WireValue::null(attr_ty.clone()),
                };
                values.insert(name.clone(), value);
            }
            Ok(WireValue::new(ty.clone(), WireData::Object(values)))
        }
        _ => Err(mismatch()),
    }
}

fn decode_items(items: &[Json], element: &WireType, depth: usize) -> Result<Vec<WireValue>, WireError> {
    items
        .iter()
        .map(|item| from_json_impl(item, element, depth + 1))
        .collect()
}

/// Wire type implied by the shape of a JSON document
pub fn infer_wire_type(json: &Json) -> WireType {
    match json {
        Json::Null => WireType::Dynamic,
        Json::Bool(_) => WireType::Bool,
        Json::Number(_) => WireType::Number,
        Json::String(_) => WireType::String,
        Json::Array(items) => WireType::Tuple(items.iter().map(infer_wire_type).collect()),
        Json::Object(fields) => WireType::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), infer_wire_type(v)))
                .collect(),
        ),
    }
}
