//! Typed values
//!
//! This module defines [`Value`], the closed set of typed values the framework
//! hands to plugin logic, and one struct per variant.
//!
//! ## Three states
//!
//! Every value is Null (explicitly absent), Unknown (determined later) or
//! Known. The states never compare equal to each other. Two Unknown values
//! of the same type are equal; an Unknown never equals a Known value.
//!
//! ## Construction invariants
//!
//! Collection constructors check their invariants up front and return
//! [`ValueError`] instead of building an invalid value:
//! - List/Set/Map elements all have the declared element type
//! - Set elements are unique under deep equality (fully-known elements only;
//!   an element containing Unknown cannot be compared yet)
//! - Object attributes match the declared attribute types exactly
//! - Tuple elements match the declared positional types
//!
//! Values are immutable; every transformation builds a new value.

use crate::error::ValueError;
use crate::extension::CustomValue;
use crate::number::Number;
use crate::types::{ObjectType, Type};
use crate::wire::{WireData, WireType, WireValue};
use std::collections::BTreeMap;
use std::fmt;

/// Null / Unknown / Known state of a value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueState<T> {
    /// Explicitly absent
    Null,
    /// Not yet determined
    Unknown,
    /// Present payload
    Known(T),
}

impl<T> ValueState<T> {
    /// Check if the state is Null
    pub fn is_null(&self) -> bool {
        matches!(self, ValueState::Null)
    }

    /// Check if the state is Unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, ValueState::Unknown)
    }

    /// Borrow the payload if Known
    pub fn known(&self) -> Option<&T> {
        match self {
            ValueState::Known(v) => Some(v),
            _ => None,
        }
    }

    fn to_wire_data(&self, known: impl FnOnce(&T) -> WireData) -> WireData {
        match self {
            ValueState::Null => WireData::Null,
            ValueState::Unknown => WireData::Unknown,
            ValueState::Known(v) => known(v),
        }
    }
}

macro_rules! scalar_value {
    ($(#[$doc:meta])* $name:ident, $payload:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(ValueState<$payload>);

        impl $name {
            /// Null value
            pub fn null() -> Self {
                $name(ValueState::Null)
            }

            /// Unknown value
            pub fn unknown() -> Self {
                $name(ValueState::Unknown)
            }

            /// Current state
            pub fn state(&self) -> &ValueState<$payload> {
                &self.0
            }

            /// Check if this value is null
            pub fn is_null(&self) -> bool {
                self.0.is_null()
            }

            /// Check if this value is unknown
            pub fn is_unknown(&self) -> bool {
                self.0.is_unknown()
            }
        }
    };
}

scalar_value!(
    /// Boolean value
    BoolValue,
    bool
);
scalar_value!(
    /// 64-bit float value; always finite
    Float64Value,
    f64
);
scalar_value!(
    /// 64-bit integer value
    Int64Value,
    i64
);
scalar_value!(
    /// Arbitrary-precision number value
    NumberValue,
    Number
);
scalar_value!(
    /// String value
    StringValue,
    String
);

impl BoolValue {
    /// Known boolean
    pub fn new(value: bool) -> Self {
        BoolValue(ValueState::Known(value))
    }

    /// The boolean, if known
    pub fn value(&self) -> Option<bool> {
        self.0.known().copied()
    }
}

impl Float64Value {
    /// Known float; NaN and infinities have no wire form and are rejected
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NonFiniteFloat(value.to_string()));
        }
        Ok(Float64Value(ValueState::Known(value)))
    }

    /// The float, if known
    pub fn value(&self) -> Option<f64> {
        self.0.known().copied()
    }
}

impl Int64Value {
    /// Known integer
    pub fn new(value: i64) -> Self {
        Int64Value(ValueState::Known(value))
    }

    /// The integer, if known
    pub fn value(&self) -> Option<i64> {
        self.0.known().copied()
    }
}

impl NumberValue {
    /// Known number
    pub fn new(value: impl Into<Number>) -> Self {
        NumberValue(ValueState::Known(value.into()))
    }

    /// The number, if known
    pub fn value(&self) -> Option<&Number> {
        self.0.known()
    }
}

impl StringValue {
    /// Known string
    pub fn new(value: impl Into<String>) -> Self {
        StringValue(ValueState::Known(value.into()))
    }

    /// The string, if known
    pub fn value(&self) -> Option<&str> {
        self.0.known().map(String::as_str)
    }
}

fn check_element(index: usize, expected: &Type, element: &Value) -> Result<(), ValueError> {
    let found = element.ty();
    if found.equal(expected) {
        Ok(())
    } else {
        Err(ValueError::ElementTypeMismatch {
            index,
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }
}

/// Ordered list with a uniform element type
#[derive(Debug, Clone)]
pub struct ListValue {
    element_type: Type,
    state: ValueState<Vec<Value>>,
}

impl ListValue {
    /// Known list; every element must have `element_type`
    pub fn new(element_type: Type, elements: Vec<Value>) -> Result<Self, ValueError> {
        for (i, element) in elements.iter().enumerate() {
            check_element(i, &element_type, element)?;
        }
        Ok(ListValue {
            element_type,
            state: ValueState::Known(elements),
        })
    }

    /// Null list
    pub fn null(element_type: Type) -> Self {
        ListValue {
            element_type,
            state: ValueState::Null,
        }
    }

    /// Unknown list
    pub fn unknown(element_type: Type) -> Self {
        ListValue {
            element_type,
            state: ValueState::Unknown,
        }
    }

    /// Declared element type
    pub fn element_type(&self) -> &Type {
        &self.element_type
    }

    /// Current state
    pub fn state(&self) -> &ValueState<Vec<Value>> {
        &self.state
    }

    /// Elements, if known
    pub fn elements(&self) -> Option<&[Value]> {
        self.state.known().map(Vec::as_slice)
    }
}

/// Unordered collection of unique elements with a uniform element type
#[derive(Debug, Clone)]
pub struct SetValue {
    element_type: Type,
    state: ValueState<Vec<Value>>,
}

impl SetValue {
    /// Known set; rejects elements of the wrong type and duplicate elements
    pub fn new(element_type: Type, elements: Vec<Value>) -> Result<Self, ValueError> {
        for (i, element) in elements.iter().enumerate() {
            check_element(i, &element_type, element)?;
        }
        if let Some(index) = first_duplicate(&elements) {
            return Err(ValueError::DuplicateSetElement {
                index,
                element: elements[index].to_string(),
            });
        }
        Ok(SetValue {
            element_type,
            state: ValueState::Known(elements),
        })
    }

    /// Null set
    pub fn null(element_type: Type) -> Self {
        SetValue {
            element_type,
            state: ValueState::Null,
        }
    }

    /// Unknown set
    pub fn unknown(element_type: Type) -> Self {
        SetValue {
            element_type,
            state: ValueState::Unknown,
        }
    }

    /// Declared element type
    pub fn element_type(&self) -> &Type {
        &self.element_type
    }

    /// Current state
    pub fn state(&self) -> &ValueState<Vec<Value>> {
        &self.state
    }

    /// Elements, if known; order carries no meaning
    pub fn elements(&self) -> Option<&[Value]> {
        self.state.known().map(Vec::as_slice)
    }

    /// Check set membership under deep equality
    pub fn contains(&self, value: &Value) -> bool {
        self.elements()
            .is_some_and(|elems| elems.iter().any(|e| e.equal(value)))
    }
}

/// Indexes of elements that repeat an earlier fully-known element
pub fn duplicate_indexes(elements: &[Value]) -> Vec<usize> {
    (0..elements.len())
        .filter(|&i| {
            elements[i].is_fully_known()
                && elements[..i]
                    .iter()
                    .any(|earlier| earlier.is_fully_known() && earlier.equal(&elements[i]))
        })
        .collect()
}

fn first_duplicate(elements: &[Value]) -> Option<usize> {
    duplicate_indexes(elements).into_iter().next()
}

/// String-keyed map with a uniform element type
#[derive(Debug, Clone)]
pub struct MapValue {
    element_type: Type,
    state: ValueState<BTreeMap<String, Value>>,
}

impl MapValue {
    /// Known map; every entry must have `element_type`
    pub fn new(
        element_type: Type,
        entries: BTreeMap<String, Value>,
    ) -> Result<Self, ValueError> {
        for (key, value) in &entries {
            let found = value.ty();
            if !found.equal(&element_type) {
                return Err(ValueError::MapEntryTypeMismatch {
                    key: key.clone(),
                    expected: element_type.to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(MapValue {
            element_type,
            state: ValueState::Known(entries),
        })
    }

    /// Null map
    pub fn null(element_type: Type) -> Self {
        MapValue {
            element_type,
            state: ValueState::Null,
        }
    }

    /// Unknown map
    pub fn unknown(element_type: Type) -> Self {
        MapValue {
            element_type,
            state: ValueState::Unknown,
        }
    }

    /// Declared element type
    pub fn element_type(&self) -> &Type {
        &self.element_type
    }

    /// Current state
    pub fn state(&self) -> &ValueState<BTreeMap<String, Value>> {
        &self.state
    }

    /// Entries, if known
    pub fn entries(&self) -> Option<&BTreeMap<String, Value>> {
        self.state.known()
    }

    /// Entry for `key`, if known and present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries().and_then(|entries| entries.get(key))
    }
}

/// Named attributes with per-attribute declared types
#[derive(Debug, Clone)]
pub struct ObjectValue {
    ty: ObjectType,
    state: ValueState<BTreeMap<String, Value>>,
}

impl ObjectValue {
    /// Known object; attributes must match `ty` exactly
    pub fn new(ty: ObjectType, attributes: BTreeMap<String, Value>) -> Result<Self, ValueError> {
        for (name, expected) in ty.attribute_types() {
            let value = attributes
                .get(name)
                .ok_or_else(|| ValueError::MissingAttribute(name.clone()))?;
            let found = value.ty();
            if !found.equal(expected) {
                return Err(ValueError::AttributeTypeMismatch {
                    name: name.clone(),
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
        if let Some(extra) = attributes
            .keys()
            .find(|name| ty.attribute_type(name).is_none())
        {
            return Err(ValueError::UnexpectedAttribute(extra.clone()));
        }
        Ok(ObjectValue {
            ty,
            state: ValueState::Known(attributes),
        })
    }

    /// Null object
    pub fn null(ty: ObjectType) -> Self {
        ObjectValue {
            ty,
            state: ValueState::Null,
        }
    }

    /// Unknown object
    pub fn unknown(ty: ObjectType) -> Self {
        ObjectValue {
            ty,
            state: ValueState::Unknown,
        }
    }

    /// Declared object type
    pub fn object_type(&self) -> &ObjectType {
        &self.ty
    }

    /// Current state
    pub fn state(&self) -> &ValueState<BTreeMap<String, Value>> {
        &self.state
    }

    /// Attributes, if known
    pub fn attributes(&self) -> Option<&BTreeMap<String, Value>> {
        self.state.known()
    }

    /// Attribute `name`, if known
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes().and_then(|attrs| attrs.get(name))
    }
}

/// Positional elements with per-position declared types
#[derive(Debug, Clone)]
pub struct TupleValue {
    element_types: Vec<Type>,
    state: ValueState<Vec<Value>>,
}

impl TupleValue {
    /// Known tuple; element `i` must have `element_types[i]`
    pub fn new(element_types: Vec<Type>, elements: Vec<Value>) -> Result<Self, ValueError> {
        if element_types.len() != elements.len() {
            return Err(ValueError::TupleArity {
                expected: element_types.len(),
                actual: elements.len(),
            });
        }
        for (i, (expected, element)) in element_types.iter().zip(&elements).enumerate() {
            check_element(i, expected, element)?;
        }
        Ok(TupleValue {
            element_types,
            state: ValueState::Known(elements),
        })
    }

    /// Null tuple
    pub fn null(element_types: Vec<Type>) -> Self {
        TupleValue {
            element_types,
            state: ValueState::Null,
        }
    }

    /// Unknown tuple
    pub fn unknown(element_types: Vec<Type>) -> Self {
        TupleValue {
            element_types,
            state: ValueState::Unknown,
        }
    }

    /// Declared element types
    pub fn element_types(&self) -> &[Type] {
        &self.element_types
    }

    /// Current state
    pub fn state(&self) -> &ValueState<Vec<Value>> {
        &self.state
    }

    /// Elements, if known
    pub fn elements(&self) -> Option<&[Value]> {
        self.state.known().map(Vec::as_slice)
    }
}

/// Value whose concrete type is only known at runtime
///
/// Known dynamic values wrap the concrete value decoded from the wire; that
/// inner value may itself be null or unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue(ValueState<Box<Value>>);

impl DynamicValue {
    /// Wrap a concrete value
    pub fn new(value: Value) -> Self {
        DynamicValue(ValueState::Known(Box::new(value)))
    }

    /// Null with no concrete type
    pub fn null() -> Self {
        DynamicValue(ValueState::Null)
    }

    /// Unknown with no concrete type
    pub fn unknown() -> Self {
        DynamicValue(ValueState::Unknown)
    }

    /// Current state
    pub fn state(&self) -> &ValueState<Box<Value>> {
        &self.0
    }

    /// The concrete value, if any
    pub fn underlying(&self) -> Option<&Value> {
        self.0.known().map(Box::as_ref)
    }
}

/// A typed value
#[derive(Debug, Clone)]
pub enum Value {
    /// Boolean
    Bool(BoolValue),
    /// 64-bit float
    Float64(Float64Value),
    /// 64-bit integer
    Int64(Int64Value),
    /// Arbitrary-precision number
    Number(NumberValue),
    /// String
    String(StringValue),
    /// Ordered list
    List(ListValue),
    /// Unordered unique set
    Set(SetValue),
    /// String-keyed map
    Map(MapValue),
    /// Named heterogeneous attributes
    Object(ObjectValue),
    /// Positional heterogeneous elements
    Tuple(TupleValue),
    /// Runtime-typed value
    Dynamic(DynamicValue),
    /// User-defined value layered over a base value
    Custom(CustomValue),
}

impl Value {
    /// The type of this value
    pub fn ty(&self) -> Type {
        match self {
            Value::Bool(_) => Type::Bool,
            Value::Float64(_) => Type::Float64,
            Value::Int64(_) => Type::Int64,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::List(v) => Type::list(v.element_type.clone()),
            Value::Set(v) => Type::set(v.element_type.clone()),
            Value::Map(v) => Type::map(v.element_type.clone()),
            Value::Object(v) => Type::Object(v.ty.clone()),
            Value::Tuple(v) => Type::Tuple(v.element_types.clone()),
            Value::Dynamic(_) => Type::Dynamic,
            Value::Custom(v) => Type::Custom(v.custom_type().clone()),
        }
    }

    /// Deep, variant-for-variant equality
    ///
    /// Custom values route through their extension's `value_equal`.
    pub fn equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Custom(a), _) => a.equal(other),
            (_, Value::Custom(b)) => b.equal(self),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.element_type.equal(&b.element_type) && a.state == b.state
            }
            (Value::Set(a), Value::Set(b)) => {
                a.element_type.equal(&b.element_type)
                    && match (&a.state, &b.state) {
                        (ValueState::Known(x), ValueState::Known(y)) => {
                            x.len() == y.len()
                                && x.iter().all(|e| y.iter().any(|f| e.equal(f)))
                                && y.iter().all(|f| x.iter().any(|e| e.equal(f)))
                        }
                        (ValueState::Null, ValueState::Null) => true,
                        (ValueState::Unknown, ValueState::Unknown) => true,
                        _ => false,
                    }
            }
            (Value::Map(a), Value::Map(b)) => {
                a.element_type.equal(&b.element_type) && a.state == b.state
            }
            (Value::Object(a), Value::Object(b)) => a.ty == b.ty && a.state == b.state,
            (Value::Tuple(a), Value::Tuple(b)) => {
                a.element_types.len() == b.element_types.len()
                    && a.element_types
                        .iter()
                        .zip(&b.element_types)
                        .all(|(x, y)| x.equal(y))
                    && a.state == b.state
            }
            (Value::Dynamic(a), Value::Dynamic(b)) => a == b,
            _ => false,
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        match self {
            Value::Bool(v) => v.is_null(),
            Value::Float64(v) => v.is_null(),
            Value::Int64(v) => v.is_null(),
            Value::Number(v) => v.is_null(),
            Value::String(v) => v.is_null(),
            Value::List(v) => v.state.is_null(),
            Value::Set(v) => v.state.is_null(),
            Value::Map(v) => v.state.is_null(),
            Value::Object(v) => v.state.is_null(),
            Value::Tuple(v) => v.state.is_null(),
            Value::Dynamic(v) => v.0.is_null(),
            Value::Custom(v) => v.base().is_null(),
        }
    }

    /// Check if this value is unknown
    pub fn is_unknown(&self) -> bool {
        match self {
            Value::Bool(v) => v.is_unknown(),
            Value::Float64(v) => v.is_unknown(),
            Value::Int64(v) => v.is_unknown(),
            Value::Number(v) => v.is_unknown(),
            Value::String(v) => v.is_unknown(),
            Value::List(v) => v.state.is_unknown(),
            Value::Set(v) => v.state.is_unknown(),
            Value::Map(v) => v.state.is_unknown(),
            Value::Object(v) => v.state.is_unknown(),
            Value::Tuple(v) => v.state.is_unknown(),
            Value::Dynamic(v) => v.0.is_unknown(),
            Value::Custom(v) => v.base().is_unknown(),
        }
    }

    /// Check if this value and every nested value is not unknown
    pub fn is_fully_known(&self) -> bool {
        if self.is_unknown() {
            return false;
        }
        match self {
            Value::List(v) => v.elements().map_or(true, |e| e.iter().all(Value::is_fully_known)),
            Value::Set(v) => v.elements().map_or(true, |e| e.iter().all(Value::is_fully_known)),
            Value::Tuple(v) => v.elements().map_or(true, |e| e.iter().all(Value::is_fully_known)),
            Value::Map(v) => v
                .entries()
                .map_or(true, |e| e.values().all(Value::is_fully_known)),
            Value::Object(v) => v
                .attributes()
                .map_or(true, |a| a.values().all(Value::is_fully_known)),
            Value::Dynamic(v) => v.underlying().map_or(true, Value::is_fully_known),
            Value::Custom(v) => v.base().is_fully_known(),
            _ => true,
        }
    }

    /// Encode back into a wire value; inverse of `Type::value_from_wire`
    pub fn to_wire(&self) -> WireValue {
        match self {
            Value::Bool(v) => WireValue::new(WireType::Bool, v.0.to_wire_data(|b| WireData::Bool(*b))),
            Value::Float64(v) => WireValue::new(
                WireType::Number,
                v.0.to_wire_data(|f| {
                    Number::from_f64(*f).map_or(WireData::Null, WireData::Number)
                }),
            ),
            Value::Int64(v) => WireValue::new(
                WireType::Number,
                v.0.to_wire_data(|i| WireData::Number(Number::from(*i))),
            ),
            Value::Number(v) => WireValue::new(
                WireType::Number,
                v.0.to_wire_data(|n| WireData::Number(n.clone())),
            ),
            Value::String(v) => WireValue::new(
                WireType::String,
                v.0.to_wire_data(|s| WireData::String(s.clone())),
            ),
            Value::List(v) => WireValue::new(
                self.ty().wire_type(),
                v.state
                    .to_wire_data(|elems| WireData::List(elems.iter().map(Value::to_wire).collect())),
            ),
            Value::Set(v) => WireValue::new(
                self.ty().wire_type(),
                v.state
                    .to_wire_data(|elems| WireData::Set(elems.iter().map(Value::to_wire).collect())),
            ),
            Value::Map(v) => WireValue::new(
                self.ty().wire_type(),
                v.state.to_wire_data(|entries| {
                    WireData::Map(entries.iter().map(|(k, v)| (k.clone(), v.to_wire())).collect())
                }),
            ),
            Value::Object(v) => WireValue::new(
                self.ty().wire_type(),
                v.state.to_wire_data(|attrs| {
                    WireData::Object(attrs.iter().map(|(k, v)| (k.clone(), v.to_wire())).collect())
                }),
            ),
            Value::Tuple(v) => WireValue::new(
                self.ty().wire_type(),
                v.state
                    .to_wire_data(|elems| WireData::Tuple(elems.iter().map(Value::to_wire).collect())),
            ),
            Value::Dynamic(v) => match &v.0 {
                ValueState::Known(inner) => inner.to_wire(),
                ValueState::Null => WireValue::null(WireType::Dynamic),
                ValueState::Unknown => WireValue::unknown(WireType::Dynamic),
            },
            Value::Custom(v) => v.base().to_wire(),
        }
    }

    /// Borrow as a list
    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Value::List(v) => Some(v),
            Value::Custom(v) => v.base().as_list(),
            _ => None,
        }
    }

    /// Borrow as a set
    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Value::Set(v) => Some(v),
            Value::Custom(v) => v.base().as_set(),
            _ => None,
        }
    }

    /// Borrow as a map
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(v) => Some(v),
            Value::Custom(v) => v.base().as_map(),
            _ => None,
        }
    }

    /// Borrow as an object
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(v) => Some(v),
            Value::Custom(v) => v.base().as_object(),
            _ => None,
        }
    }

    /// The boolean payload, if this is a known bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => v.value(),
            Value::Custom(v) => v.base().as_bool(),
            _ => None,
        }
    }

    /// The string payload, if this is a known string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => v.value(),
            Value::Custom(v) => v.base().as_str(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

fn write_state<T>(
    f: &mut fmt::Formatter<'_>,
    state: &ValueState<T>,
    known: impl FnOnce(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    match state {
        ValueState::Null => write!(f, "<null>"),
        ValueState::Unknown => write!(f, "<unknown>"),
        ValueState::Known(v) => known(f, v),
    }
}

fn write_sequence(f: &mut fmt::Formatter<'_>, elems: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, e) in elems.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", e)?;
    }
    write!(f, "]")
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &BTreeMap<String, Value>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (k, v)) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{:?}:{}", k, v)?;
    }
    write!(f, "}}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write_state(f, &v.0, |f, b| write!(f, "{}", b)),
            Value::Float64(v) => write_state(f, &v.0, |f, x| write!(f, "{}", x)),
            Value::Int64(v) => write_state(f, &v.0, |f, i| write!(f, "{}", i)),
            Value::Number(v) => write_state(f, &v.0, |f, n| write!(f, "{}", n)),
            Value::String(v) => write_state(f, &v.0, |f, s| write!(f, "{:?}", s)),
            Value::List(v) => write_state(f, &v.state, |f, e| write_sequence(f, e)),
            Value::Set(v) => write_state(f, &v.state, |f, e| write_sequence(f, e)),
            Value::Tuple(v) => write_state(f, &v.state, |f, e| write_sequence(f, e)),
            Value::Map(v) => write_state(f, &v.state, |f, e| write_entries(f, e)),
            Value::Object(v) => write_state(f, &v.state, |f, e| write_entries(f, e)),
            Value::Dynamic(v) => write_state(f, &v.0, |f, inner| write!(f, "{}", inner)),
            Value::Custom(v) => write!(f, "{}", v.base()),
        }
    }
}

impl From<BoolValue> for Value {
    fn from(v: BoolValue) -> Self {
        Value::Bool(v)
    }
}

impl From<Float64Value> for Value {
    fn from(v: Float64Value) -> Self {
        Value::Float64(v)
    }
}

impl From<Int64Value> for Value {
    fn from(v: Int64Value) -> Self {
        Value::Int64(v)
    }
}

impl From<NumberValue> for Value {
    fn from(v: NumberValue) -> Self {
        Value::Number(v)
    }
}

impl From<StringValue> for Value {
    fn from(v: StringValue) -> Self {
        Value::String(v)
    }
}

impl From<ListValue> for Value {
    fn from(v: ListValue) -> Self {
        Value::List(v)
    }
}

impl From<SetValue> for Value {
    fn from(v: SetValue) -> Self {
        Value::Set(v)
    }
}

impl From<MapValue> for Value {
    fn from(v: MapValue) -> Self {
        Value::Map(v)
    }
}

impl From<ObjectValue> for Value {
    fn from(v: ObjectValue) -> Self {
        Value::Object(v)
    }
}

impl From<TupleValue> for Value {
    fn from(v: TupleValue) -> Self {
        Value::Tuple(v)
    }
}

impl From<DynamicValue> for Value {
    fn from(v: DynamicValue) -> Self {
        Value::Dynamic(v)
    }
}

impl From<CustomValue> for Value {
    fn from(v: CustomValue) -> Self {
        Value::Custom(v)
    }
}
