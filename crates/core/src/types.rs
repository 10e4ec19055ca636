//! Type descriptors
//!
//! [`Type`] identifies the shape of a [`Value`] and carries the parameters
//! of that shape (element type, attribute types, positional types). Types
//! are immutable and compare structurally, never by identity.
//!
//! Every type can:
//! - report its wire type ([`Type::wire_type`])
//! - decode a wire value into a typed value ([`Type::value_from_wire`])
//! - validate a wire value without decoding it ([`Type::validate`])
//!
//! ## Decoding
//!
//! `value_from_wire` has three branches: a null payload yields the type's
//! null value, an unknown payload yields its unknown value, and a known
//! payload is decoded. A wire type the static type does not accept is a
//! fatal [`ConversionError::WireTypeMismatch`]. A decimal with no exact
//! 64-bit form is a non-fatal [`ConversionError::PrecisionLoss`].
//!
//! A set payload with repeated elements fails `value_from_wire`.
//! [`Type::value_from_wire_keep_first`] decodes it anyway, at any depth,
//! keeping first occurrences and reporting every dropped repeat.
//!
//! ## Validation
//!
//! `validate` never stops at the first problem: collection types validate
//! every element with the element's path step appended.

use crate::diag::Diagnostics;
use crate::error::{ConversionError, ValueError, WireError};
use crate::extension::CustomType;
use crate::path::{AttributePath, PathStep};
use crate::value::{
    duplicate_indexes, BoolValue, DynamicValue, Float64Value, Int64Value, ListValue, MapValue, NumberValue,
    ObjectValue, SetValue, StringValue, TupleValue, Value,
};
use crate::wire::{WireData, WireType, WireValue};
use std::collections::BTreeMap;
use std::fmt;

const FLOAT64_TARGET: &str = "64-bit floating point";
const INT64_TARGET: &str = "64-bit integer";

/// Attribute types of an object
#[derive(Debug, Clone, Default)]
pub struct ObjectType {
    attribute_types: BTreeMap<String, Type>,
}

impl ObjectType {
    /// Object type with the given attribute types
    pub fn new<K: Into<String>>(attribute_types: impl IntoIterator<Item = (K, Type)>) -> Self {
        ObjectType {
            attribute_types: attribute_types
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        }
    }

    /// All attribute types, ordered by name
    pub fn attribute_types(&self) -> &BTreeMap<String, Type> {
        &self.attribute_types
    }

    /// Type of attribute `name`
    pub fn attribute_type(&self, name: &str) -> Option<&Type> {
        self.attribute_types.get(name)
    }

    /// Structural equality
    pub fn equal(&self, other: &ObjectType) -> bool {
        self.attribute_types.len() == other.attribute_types.len()
            && self
                .attribute_types
                .iter()
                .all(|(name, ty)| other.attribute_types.get(name).is_some_and(|o| ty.equal(o)))
    }

    fn wire_type(&self) -> WireType {
        WireType::Object(
            self.attribute_types
                .iter()
                .map(|(name, ty)| (name.clone(), ty.wire_type()))
                .collect(),
        )
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

/// A type descriptor
#[derive(Debug, Clone)]
pub enum Type {
    /// Boolean
    Bool,
    /// 64-bit float, narrowed exactly from a wire number
    Float64,
    /// 64-bit integer, narrowed exactly from a wire number
    Int64,
    /// Arbitrary-precision number
    Number,
    /// String
    String,
    /// Ordered list of the element type
    List(Box<Type>),
    /// Unordered unique set of the element type
    Set(Box<Type>),
    /// String-keyed map of the element type
    Map(Box<Type>),
    /// Named heterogeneous attributes
    Object(ObjectType),
    /// Positional heterogeneous elements
    Tuple(Vec<Type>),
    /// Type decided by the wire value at runtime
    Dynamic,
    /// User-defined type layered over a base type
    Custom(CustomType),
}

impl Type {
    /// List of `element`
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    /// Set of `element`
    pub fn set(element: Type) -> Self {
        Type::Set(Box::new(element))
    }

    /// Map of `element`
    pub fn map(element: Type) -> Self {
        Type::Map(Box::new(element))
    }

    /// Object with the given attribute types
    pub fn object<K: Into<String>>(attribute_types: impl IntoIterator<Item = (K, Type)>) -> Self {
        Type::Object(ObjectType::new(attribute_types))
    }

    /// Structural equality
    ///
    /// Custom types route through their extension's `type_equal`, which by
    /// default compares the base type.
    pub fn equal(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Custom(a), _) => a.type_equal(other),
            (_, Type::Custom(b)) => b.type_equal(self),
            (Type::Bool, Type::Bool)
            | (Type::Float64, Type::Float64)
            | (Type::Int64, Type::Int64)
            | (Type::Number, Type::Number)
            | (Type::String, Type::String)
            | (Type::Dynamic, Type::Dynamic) => true,
            (Type::List(a), Type::List(b))
            | (Type::Set(a), Type::Set(b))
            | (Type::Map(a), Type::Map(b)) => a.equal(b),
            (Type::Object(a), Type::Object(b)) => a.equal(b),
            (Type::Tuple(a), Type::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equal(y))
            }
            _ => false,
        }
    }

    /// Short kind label used in diagnostic summaries
    pub fn kind_label(&self) -> &'static str {
        match self {
            Type::Bool => "Bool",
            Type::Float64 => "Float64",
            Type::Int64 => "Int64",
            Type::Number => "Number",
            Type::String => "String",
            Type::List(_) => "List",
            Type::Set(_) => "Set",
            Type::Map(_) => "Map",
            Type::Object(_) => "Object",
            Type::Tuple(_) => "Tuple",
            Type::Dynamic => "Dynamic",
            Type::Custom(c) => c.base().kind_label(),
        }
    }

    /// The structural wire type values of this type travel as
    pub fn wire_type(&self) -> WireType {
        match self {
            Type::Bool => WireType::Bool,
            Type::Float64 | Type::Int64 | Type::Number => WireType::Number,
            Type::String => WireType::String,
            Type::List(e) => WireType::list(e.wire_type()),
            Type::Set(e) => WireType::set(e.wire_type()),
            Type::Map(e) => WireType::map(e.wire_type()),
            Type::Object(o) => o.wire_type(),
            Type::Tuple(elems) => WireType::Tuple(elems.iter().map(Type::wire_type).collect()),
            Type::Dynamic => WireType::Dynamic,
            Type::Custom(c) => c.base().wire_type(),
        }
    }

    /// Infer the framework type for a wire type
    ///
    /// Numbers become [`Type::Number`] so no precision is lost.
    pub fn from_wire_type(wire: &WireType) -> Type {
        match wire {
            WireType::Bool => Type::Bool,
            WireType::Number => Type::Number,
            WireType::String => Type::String,
            WireType::Dynamic => Type::Dynamic,
            WireType::List(e) => Type::list(Type::from_wire_type(e)),
            WireType::Set(e) => Type::set(Type::from_wire_type(e)),
            WireType::Map(e) => Type::map(Type::from_wire_type(e)),
            WireType::Object(attrs) => Type::Object(ObjectType::new(
                attrs
                    .iter()
                    .map(|(name, ty)| (name.clone(), Type::from_wire_type(ty))),
            )),
            WireType::Tuple(elems) => Type::Tuple(elems.iter().map(Type::from_wire_type).collect()),
        }
    }

    /// The null value of this type
    pub fn null_value(&self) -> Value {
        match self {
            Type::Bool => Value::Bool(BoolValue::null()),
            Type::Float64 => Value::Float64(Float64Value::null()),
            Type::Int64 => Value::Int64(Int64Value::null()),
            Type::Number => Value::Number(NumberValue::null()),
            Type::String => Value::String(StringValue::null()),
            Type::List(e) => Value::List(ListValue::null((**e).clone())),
            Type::Set(e) => Value::Set(SetValue::null((**e).clone())),
            Type::Map(e) => Value::Map(MapValue::null((**e).clone())),
            Type::Object(o) => Value::Object(ObjectValue::null(o.clone())),
            Type::Tuple(elems) => Value::Tuple(TupleValue::null(elems.clone())),
            Type::Dynamic => Value::Dynamic(DynamicValue::null()),
            Type::Custom(c) => c.wrap_unchecked(c.base().null_value()),
        }
    }

    /// The unknown value of this type
    pub fn unknown_value(&self) -> Value {
        match self {
            Type::Bool => Value::Bool(BoolValue::unknown()),
            Type::Float64 => Value::Float64(Float64Value::unknown()),
            Type::Int64 => Value::Int64(Int64Value::unknown()),
            Type::Number => Value::Number(NumberValue::unknown()),
            Type::String => Value::String(StringValue::unknown()),
            Type::List(e) => Value::List(ListValue::unknown((**e).clone())),
            Type::Set(e) => Value::Set(SetValue::unknown((**e).clone())),
            Type::Map(e) => Value::Map(MapValue::unknown((**e).clone())),
            Type::Object(o) => Value::Object(ObjectValue::unknown(o.clone())),
            Type::Tuple(elems) => Value::Tuple(TupleValue::unknown(elems.clone())),
            Type::Dynamic => Value::Dynamic(DynamicValue::unknown()),
            Type::Custom(c) => c.wrap_unchecked(c.base().unknown_value()),
        }
    }

    /// The type reached by applying one path step to this type
    pub fn apply_step(&self, step: &PathStep) -> Option<Type> {
        match (self, step) {
            (Type::Custom(c), _) => c.base().apply_step(step),
            (Type::Dynamic, _) => Some(Type::Dynamic),
            (Type::List(e), PathStep::ListIndex(_))
            | (Type::Set(e), PathStep::SetElement(_))
            | (Type::Map(e), PathStep::MapKey(_)) => Some((**e).clone()),
            (Type::Object(o), PathStep::AttributeName(name) | PathStep::BlockName(name)) => {
                o.attribute_type(name).cloned()
            }
            (Type::Tuple(elems), PathStep::ListIndex(i)) => elems.get(*i).cloned(),
            _ => None,
        }
    }

    /// Decode a wire value into a value of this type
    pub fn value_from_wire(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match self {
            Type::Custom(c) => return c.value_from_wire(wire),
            Type::Dynamic => return dynamic_from_wire(wire),
            _ => {}
        }

        let expected = self.wire_type();
        if !expected.accepts(wire.ty()) {
            return Err(ConversionError::WireTypeMismatch {
                expected,
                found: wire.ty().clone(),
            });
        }
        match wire.data() {
            WireData::Null => return Ok(self.null_value()),
            WireData::Unknown => return Ok(self.unknown_value()),
            _ => {}
        }

        let value = match self {
            Type::Bool => Value::Bool(BoolValue::new(wire.as_bool()?)),
            Type::Float64 => {
                let n = wire.as_number()?;
                let f = n.to_f64_exact().ok_or_else(|| ConversionError::PrecisionLoss {
                    value: n.to_string(),
                    target: FLOAT64_TARGET,
                })?;
                Value::Float64(Float64Value::new(f)?)
            }
            Type::Int64 => {
                let n = wire.as_number()?;
                let i = n.to_i64_exact().ok_or_else(|| ConversionError::PrecisionLoss {
                    value: n.to_string(),
                    target: INT64_TARGET,
                })?;
                Value::Int64(Int64Value::new(i))
            }
            Type::Number => Value::Number(NumberValue::new(wire.as_number()?.clone())),
            Type::String => Value::String(StringValue::new(wire.as_str()?)),
            Type::List(e) => {
                let elems = decode_elements(e, wire.as_elements()?)?;
                Value::List(ListValue::new((**e).clone(), elems)?)
            }
            Type::Set(e) => {
                let elems = decode_elements(e, wire.as_elements()?)?;
                Value::Set(SetValue::new((**e).clone(), elems)?)
            }
            Type::Map(e) => {
                let entries = wire
                    .as_entries()?
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), e.value_from_wire(v)?)))
                    .collect::<Result<BTreeMap<_, _>, ConversionError>>()?;
                Value::Map(MapValue::new((**e).clone(), entries)?)
            }
            Type::Object(o) => {
                let entries = wire.as_entries()?;
                let mut attrs = BTreeMap::new();
                for (name, ty) in o.attribute_types() {
                    let child = entries.get(name).ok_or_else(|| WireError::Nonconforming {
                        ty: wire.ty().clone(),
                        reason: format!("attribute {:?} missing", name),
                    })?;
                    attrs.insert(name.clone(), ty.value_from_wire(child)?);
                }
                Value::Object(ObjectValue::new(o.clone(), attrs)?)
            }
            Type::Tuple(types) => {
                let elems = wire.as_elements()?;
                if elems.len() != types.len() {
                    return Err(WireError::Nonconforming {
                        ty: wire.ty().clone(),
                        reason: format!("{} elements for {} positions", elems.len(), types.len()),
                    }
                    .into());
                }
                let values = types
                    .iter()
                    .zip(elems)
                    .map(|(ty, elem)| ty.value_from_wire(elem))
                    .collect::<Result<Vec<_>, _>>()?;
                Value::Tuple(TupleValue::new(types.clone(), values)?)
            }
            Type::Dynamic => return dynamic_from_wire(wire),
            Type::Custom(c) => return c.value_from_wire(wire),
        };
        Ok(value)
    }

    /// Decode like [`Type::value_from_wire`], dropping repeated set elements
    ///
    /// Sets nested anywhere in the payload keep the first occurrence of each
    /// element; every dropped repeat is reported in `diags` at its path below
    /// `path`. Any other conversion error is returned unchanged.
    pub fn value_from_wire_keep_first(
        &self,
        wire: &WireValue,
        path: &AttributePath,
        diags: &mut Diagnostics,
    ) -> Result<Value, ConversionError> {
        match self.value_from_wire(wire) {
            Err(ConversionError::Value(ValueError::DuplicateSetElement { .. })) => {
                self.keep_first(wire, path, diags)
            }
            result => result,
        }
    }

    fn keep_first(
        &self,
        wire: &WireValue,
        path: &AttributePath,
        diags: &mut Diagnostics,
    ) -> Result<Value, ConversionError> {
        if wire.is_null() || !wire.is_known() {
            return self.value_from_wire(wire);
        }
        if let Type::Dynamic = self {
            if *wire.ty() == WireType::Dynamic {
                return dynamic_from_wire(wire);
            }
            let concrete = Type::from_wire_type(wire.ty()).keep_first(wire, path, diags)?;
            return Ok(Value::Dynamic(DynamicValue::new(concrete)));
        }
        if !matches!(
            self,
            Type::List(_) | Type::Set(_) | Type::Map(_) | Type::Object(_) | Type::Tuple(_)
        ) {
            return self.value_from_wire(wire);
        }
        let expected = self.wire_type();
        if !expected.accepts(wire.ty()) {
            return Err(ConversionError::WireTypeMismatch {
                expected,
                found: wire.ty().clone(),
            });
        }

        let value = match self {
            Type::List(e) => {
                let mut values = Vec::new();
                for (i, elem) in wire.as_elements()?.iter().enumerate() {
                    values.push(e.keep_first(elem, &path.with(PathStep::ListIndex(i)), diags)?);
                }
                Value::List(ListValue::new((**e).clone(), values)?)
            }
            Type::Set(e) => {
                let elems = wire.as_elements()?;
                let mut keys = Vec::with_capacity(elems.len());
                let mut values = Vec::with_capacity(elems.len());
                for elem in elems {
                    let key = set_element_key(e, elem);
                    let elem_path = path.with(PathStep::SetElement(Box::new(key.clone())));
                    values.push(e.keep_first(elem, &elem_path, diags)?);
                    keys.push(key);
                }
                let duplicates = duplicate_indexes(&values);
                for &i in &duplicates {
                    report_duplicate_element(diags, path, &keys[i]);
                }
                let kept = values
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| !duplicates.contains(i))
                    .map(|(_, v)| v)
                    .collect();
                Value::Set(SetValue::new((**e).clone(), kept)?)
            }
            Type::Map(e) => {
                let mut entries = BTreeMap::new();
                for (key, elem) in wire.as_entries()? {
                    let elem_path = path.with(PathStep::MapKey(key.clone()));
                    entries.insert(key.clone(), e.keep_first(elem, &elem_path, diags)?);
                }
                Value::Map(MapValue::new((**e).clone(), entries)?)
            }
            Type::Object(o) => {
                let entries = wire.as_entries()?;
                let mut attrs = BTreeMap::new();
                for (name, ty) in o.attribute_types() {
                    let child = entries.get(name).ok_or_else(|| WireError::Nonconforming {
                        ty: wire.ty().clone(),
                        reason: format!("attribute {:?} missing", name),
                    })?;
                    let child_path = path.with(PathStep::AttributeName(name.clone()));
                    attrs.insert(name.clone(), ty.keep_first(child, &child_path, diags)?);
                }
                Value::Object(ObjectValue::new(o.clone(), attrs)?)
            }
            Type::Tuple(types) => {
                let elems = wire.as_elements()?;
                if elems.len() != types.len() {
                    return Err(WireError::Nonconforming {
                        ty: wire.ty().clone(),
                        reason: format!("{} elements for {} positions", elems.len(), types.len()),
                    }
                    .into());
                }
                let mut values = Vec::with_capacity(elems.len());
                for (i, (ty, elem)) in types.iter().zip(elems).enumerate() {
                    values.push(ty.keep_first(elem, &path.with(PathStep::ListIndex(i)), diags)?);
                }
                Value::Tuple(TupleValue::new(types.clone(), values)?)
            }
            _ => return self.value_from_wire(wire),
        };
        Ok(value)
    }

    /// Validate a wire value against this type without decoding it
    ///
    /// Checks wire-shape compatibility and domain constraints (exact
    /// narrowing, set uniqueness), collecting every problem found.
    pub fn validate(&self, wire: &WireValue, path: &AttributePath) -> Diagnostics {
        let mut diags = Diagnostics::new();
        self.validate_into(wire, path, &mut diags);
        diags
    }

    fn validate_into(&self, wire: &WireValue, path: &AttributePath, diags: &mut Diagnostics) {
        match self {
            Type::Custom(c) => {
                diags.append(c.validate(wire, path));
                return;
            }
            Type::Dynamic => {
                if *wire.ty() != WireType::Dynamic {
                    Type::from_wire_type(wire.ty()).validate_into(wire, path, diags);
                } else if wire.is_known() && !wire.is_null() {
                    diags.add_attribute_error(
                        path,
                        "Dynamic Type Validation Error",
                        provider_error_detail(format!(
                            "Received known {} payload without a concrete type",
                            wire.data().shape_name()
                        )),
                    );
                }
                return;
            }
            _ => {}
        }

        let summary = format!("{} Type Validation Error", self.kind_label());
        let expected = self.wire_type();
        if !expected.accepts(wire.ty()) {
            diags.add_attribute_error(
                path,
                summary,
                provider_error_detail(format!(
                    "Expected {} value, received {} value",
                    expected,
                    wire.ty()
                )),
            );
            return;
        }
        if wire.is_null() || !wire.is_known() {
            return;
        }

        let shape = match self {
            Type::Bool => wire.as_bool().map(|_| ()),
            Type::String => wire.as_str().map(|_| ()),
            Type::Number => wire.as_number().map(|_| ()),
            Type::Float64 => wire.as_number().map(|n| {
                if n.to_f64_exact().is_none() {
                    diags.add_attribute_error(
                        path,
                        summary.clone(),
                        format!("Value {} cannot be represented as a {}.", n, FLOAT64_TARGET),
                    );
                }
            }),
            Type::Int64 => wire.as_number().map(|n| {
                if n.to_i64_exact().is_none() {
                    diags.add_attribute_error(
                        path,
                        summary.clone(),
                        format!("Value {} cannot be represented as a {}.", n, INT64_TARGET),
                    );
                }
            }),
            Type::List(e) => wire.as_elements().map(|elems| {
                for (i, elem) in elems.iter().enumerate() {
                    e.validate_into(elem, &path.with(PathStep::ListIndex(i)), diags);
                }
            }),
            Type::Set(e) => wire.as_elements().map(|elems| validate_set(e, elems, path, diags)),
            Type::Map(e) => wire.as_entries().map(|entries| {
                for (key, value) in entries {
                    e.validate_into(value, &path.with(PathStep::MapKey(key.clone())), diags);
                }
            }),
            Type::Object(o) => wire.as_entries().map(|entries| {
                for (name, ty) in o.attribute_types() {
                    match entries.get(name) {
                        Some(child) => {
                            let step = PathStep::AttributeName(name.clone());
                            ty.validate_into(child, &path.with(step), diags);
                        }
                        None => diags.add_attribute_error(
                            path,
                            summary.clone(),
                            provider_error_detail(WireError::Nonconforming {
                                ty: wire.ty().clone(),
                                reason: format!("attribute {:?} missing", name),
                            }),
                        ),
                    }
                }
            }),
            Type::Tuple(types) => wire.as_elements().map(|elems| {
                for (i, (ty, elem)) in types.iter().zip(elems).enumerate() {
                    ty.validate_into(elem, &path.with(PathStep::ListIndex(i)), diags);
                }
            }),
            Type::Dynamic | Type::Custom(_) => Ok(()),
        };

        if let Err(err) = shape {
            diags.add_attribute_error(path, summary, provider_error_detail(err.to_string()));
        }
    }
}

/// Detail text for diagnostics that indicate a plugin bug, not a user mistake
pub fn provider_error_detail(reason: impl fmt::Display) -> String {
    format!(
        "An unexpected error was encountered trying to validate an attribute value. \
         This is always an error in the provider. Please report the following to the \
         provider developer:\n\n{}",
        reason
    )
}

/// Report a dropped repeat of a set element
///
/// `set_path` is the path of the set itself; `key` identifies the element.
pub fn report_duplicate_element(diags: &mut Diagnostics, set_path: &AttributePath, key: &Value) {
    diags.add_attribute_error(
        &set_path.with(PathStep::SetElement(Box::new(key.clone()))),
        "Duplicate Set Element",
        format!("This attribute contains duplicate values of: {}", key),
    );
}

/// Value identifying a set element in a path, decoded from its wire form
///
/// Falls back to the type inferred from the wire, then to an unknown value
/// of the element type, so an element that fails to decode still gets a path.
pub fn set_element_key(element_type: &Type, wire: &WireValue) -> Value {
    element_type
        .value_from_wire(wire)
        .or_else(|_| Type::from_wire_type(wire.ty()).value_from_wire(wire))
        .unwrap_or_else(|_| element_type.unknown_value())
}

/// Indexes of fully-known wire elements that repeat an earlier element
///
/// Elements are compared as decoded values of `element_type` so custom
/// equality applies; elements that fail to decode compare by wire payload.
pub fn duplicate_wire_elements(element_type: &Type, elems: &[WireValue]) -> Vec<usize> {
    let decoded: Vec<Option<Value>> = elems
        .iter()
        .map(|elem| element_type.value_from_wire(elem).ok())
        .collect();

    (0..elems.len())
        .filter(|&i| {
            elems[i].is_fully_known()
                && (0..i).any(|j| {
                    elems[j].is_fully_known()
                        && match (&decoded[j], &decoded[i]) {
                            (Some(a), Some(b)) => a.equal(b),
                            _ => elems[j] == elems[i],
                        }
                })
        })
        .collect()
}

fn validate_set(
    element_type: &Type,
    elems: &[WireValue],
    path: &AttributePath,
    diags: &mut Diagnostics,
) {
    let mut keys = Vec::with_capacity(elems.len());
    for elem in elems {
        let key = set_element_key(element_type, elem);
        let elem_path = path.with(PathStep::SetElement(Box::new(key.clone())));
        element_type.validate_into(elem, &elem_path, diags);
        keys.push(key);
    }
    for i in duplicate_wire_elements(element_type, elems) {
        report_duplicate_element(diags, path, &keys[i]);
    }
}

fn decode_elements(element_type: &Type, elems: &[WireValue]) -> Result<Vec<Value>, ConversionError> {
    elems.iter().map(|e| element_type.value_from_wire(e)).collect()
}

fn dynamic_from_wire(wire: &WireValue) -> Result<Value, ConversionError> {
    if *wire.ty() == WireType::Dynamic {
        return match wire.data() {
            WireData::Null => Ok(Value::Dynamic(DynamicValue::null())),
            WireData::Unknown => Ok(Value::Dynamic(DynamicValue::unknown())),
            data => Err(WireError::Nonconforming {
                ty: WireType::Dynamic,
                reason: format!("known {} payload without a concrete type", data.shape_name()),
            }
            .into()),
        };
    }
    let concrete = Type::from_wire_type(wire.ty()).value_from_wire(wire)?;
    Ok(Value::Dynamic(DynamicValue::new(concrete)))
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "BoolType"),
            Type::Float64 => write!(f, "Float64Type"),
            Type::Int64 => write!(f, "Int64Type"),
            Type::Number => write!(f, "NumberType"),
            Type::String => write!(f, "StringType"),
            Type::List(e) => write!(f, "ListType[{}]", e),
            Type::Set(e) => write!(f, "SetType[{}]", e),
            Type::Map(e) => write!(f, "MapType[{}]", e),
            Type::Object(o) => {
                write!(f, "ObjectType[")?;
                for (i, (name, ty)) in o.attribute_types().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}:{}", name, ty)?;
                }
                write!(f, "]")
            }
            Type::Tuple(elems) => {
                write!(f, "TupleType[")?;
                for (i, ty) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, "]")
            }
            Type::Dynamic => write!(f, "DynamicType"),
            Type::Custom(c) => write!(f, "{}", c.name()),
        }
    }
}
