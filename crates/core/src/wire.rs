//! Dynamic wire values
//!
//! The transport layer hands this crate untyped value trees paired with a
//! structural [`WireType`]. This module defines that shape:
//! - [`WireType`]: structural type descriptor (Bool, Number, String, Dynamic,
//!   List, Set, Map, Object, Tuple)
//! - [`WireValue`]: a wire type plus a [`WireData`] payload
//!
//! Wire values are produced by an external decoder and are not validated on
//! construction. [`WireValue::conforms`] checks self-consistency, and the
//! typed accessors report [`WireError`] when a payload is read as the wrong
//! shape.

use crate::error::WireError;
use crate::number::Number;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural type of a wire value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    /// Boolean
    Bool,
    /// Arbitrary-precision number
    Number,
    /// UTF-8 string
    String,
    /// Placeholder: the concrete type travels with the value
    Dynamic,
    /// Ordered, uniform elements
    List(Box<WireType>),
    /// Unordered, unique, uniform elements
    Set(Box<WireType>),
    /// String keys to uniform values
    Map(Box<WireType>),
    /// Named attributes with per-attribute types
    Object(BTreeMap<String, WireType>),
    /// Positional elements with per-position types
    Tuple(Vec<WireType>),
}

impl WireType {
    /// List of `element`
    pub fn list(element: WireType) -> Self {
        WireType::List(Box::new(element))
    }

    /// Set of `element`
    pub fn set(element: WireType) -> Self {
        WireType::Set(Box::new(element))
    }

    /// Map of `element`
    pub fn map(element: WireType) -> Self {
        WireType::Map(Box::new(element))
    }

    /// Object with the given attribute types
    pub fn object<K: Into<String>>(attributes: impl IntoIterator<Item = (K, WireType)>) -> Self {
        WireType::Object(
            attributes
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    /// Check if `other` is acceptable where `self` is expected
    ///
    /// Equal types are acceptable; `Dynamic` accepts any type, at any depth.
    pub fn accepts(&self, other: &WireType) -> bool {
        match (self, other) {
            (WireType::Dynamic, _) => true,
            (WireType::List(a), WireType::List(b))
            | (WireType::Set(a), WireType::Set(b))
            | (WireType::Map(a), WireType::Map(b)) => a.accepts(b),
            (WireType::Object(a), WireType::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(name, ty)| b.get(name).is_some_and(|other| ty.accepts(other)))
            }
            (WireType::Tuple(a), WireType::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.accepts(y))
            }
            (a, b) => a == b,
        }
    }

    /// Check if this type mentions `Dynamic` anywhere
    pub fn uses_dynamic(&self) -> bool {
        match self {
            WireType::Dynamic => true,
            WireType::List(e) | WireType::Set(e) | WireType::Map(e) => e.uses_dynamic(),
            WireType::Object(attrs) => attrs.values().any(WireType::uses_dynamic),
            WireType::Tuple(elems) => elems.iter().any(WireType::uses_dynamic),
            WireType::Bool | WireType::Number | WireType::String => false,
        }
    }

    /// Short shape name used in error messages
    pub fn shape_name(&self) -> &'static str {
        match self {
            WireType::Bool => "bool",
            WireType::Number => "number",
            WireType::String => "string",
            WireType::Dynamic => "dynamic",
            WireType::List(_) => "list",
            WireType::Set(_) => "set",
            WireType::Map(_) => "map",
            WireType::Object(_) => "object",
            WireType::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::Bool => write!(f, "Bool"),
            WireType::Number => write!(f, "Number"),
            WireType::String => write!(f, "String"),
            WireType::Dynamic => write!(f, "DynamicPseudoType"),
            WireType::List(e) => write!(f, "List[{}]", e),
            WireType::Set(e) => write!(f, "Set[{}]", e),
            WireType::Map(e) => write!(f, "Map[{}]", e),
            WireType::Object(attrs) => {
                write!(f, "Object[")?;
                for (i, (name, ty)) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}:{}", name, ty)?;
                }
                write!(f, "]")
            }
            WireType::Tuple(elems) => {
                write!(f, "Tuple[")?;
                for (i, ty) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Payload of a wire value
#[derive(Debug, Clone, PartialEq)]
pub enum WireData {
    /// Explicitly absent
    Null,
    /// Not yet determined
    Unknown,
    /// Boolean payload
    Bool(bool),
    /// Number payload
    Number(Number),
    /// String payload
    String(String),
    /// List elements in order
    List(Vec<WireValue>),
    /// Set elements, order not significant
    Set(Vec<WireValue>),
    /// Map entries
    Map(BTreeMap<String, WireValue>),
    /// Object attributes
    Object(BTreeMap<String, WireValue>),
    /// Tuple elements in order
    Tuple(Vec<WireValue>),
}

impl WireData {
    /// Short shape name used in error messages
    pub fn shape_name(&self) -> &'static str {
        match self {
            WireData::Null => "null",
            WireData::Unknown => "unknown",
            WireData::Bool(_) => "bool",
            WireData::Number(_) => "number",
            WireData::String(_) => "string",
            WireData::List(_) => "list",
            WireData::Set(_) => "set",
            WireData::Map(_) => "map",
            WireData::Object(_) => "object",
            WireData::Tuple(_) => "tuple",
        }
    }
}

/// A wire type paired with its payload
#[derive(Debug, Clone, PartialEq)]
pub struct WireValue {
    ty: WireType,
    data: WireData,
}

impl WireValue {
    /// Pair a type and payload without checking them
    pub fn new(ty: WireType, data: WireData) -> Self {
        WireValue { ty, data }
    }

    /// Null value of the given type
    pub fn null(ty: WireType) -> Self {
        WireValue::new(ty, WireData::Null)
    }

    /// Unknown value of the given type
    pub fn unknown(ty: WireType) -> Self {
        WireValue::new(ty, WireData::Unknown)
    }

    /// Known boolean
    pub fn bool(value: bool) -> Self {
        WireValue::new(WireType::Bool, WireData::Bool(value))
    }

    /// Known number
    pub fn number(value: impl Into<Number>) -> Self {
        WireValue::new(WireType::Number, WireData::Number(value.into()))
    }

    /// Known string
    pub fn string(value: impl Into<String>) -> Self {
        WireValue::new(WireType::String, WireData::String(value.into()))
    }

    /// Known list
    pub fn list(element: WireType, elements: Vec<WireValue>) -> Self {
        WireValue::new(WireType::list(element), WireData::List(elements))
    }

    /// Known set
    pub fn set(element: WireType, elements: Vec<WireValue>) -> Self {
        WireValue::new(WireType::set(element), WireData::Set(elements))
    }

    /// Known map
    pub fn map<K: Into<String>>(
        element: WireType,
        entries: impl IntoIterator<Item = (K, WireValue)>,
    ) -> Self {
        WireValue::new(
            WireType::map(element),
            WireData::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        )
    }

    /// Known object; its wire type is taken from the attribute values
    pub fn object<K: Into<String>>(attributes: impl IntoIterator<Item = (K, WireValue)>) -> Self {
        let attributes: BTreeMap<String, WireValue> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        let ty = WireType::Object(
            attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.ty.clone()))
                .collect(),
        );
        WireValue::new(ty, WireData::Object(attributes))
    }

    /// Known tuple; its wire type is taken from the element values
    pub fn tuple(elements: Vec<WireValue>) -> Self {
        let ty = WireType::Tuple(elements.iter().map(|e| e.ty.clone()).collect());
        WireValue::new(ty, WireData::Tuple(elements))
    }

    /// The wire type
    pub fn ty(&self) -> &WireType {
        &self.ty
    }

    /// The payload
    pub fn data(&self) -> &WireData {
        &self.data
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self.data, WireData::Null)
    }

    /// Check if this value is known (not unknown); null counts as known
    pub fn is_known(&self) -> bool {
        !matches!(self.data, WireData::Unknown)
    }

    /// Check if this value and every nested value is known
    pub fn is_fully_known(&self) -> bool {
        match &self.data {
            WireData::Unknown => false,
            WireData::List(elems) | WireData::Set(elems) | WireData::Tuple(elems) => {
                elems.iter().all(WireValue::is_fully_known)
            }
            WireData::Map(entries) | WireData::Object(entries) => {
                entries.values().all(WireValue::is_fully_known)
            }
            _ => true,
        }
    }

    fn shape_error(&self, expected: &'static str) -> WireError {
        match self.data {
            WireData::Null | WireData::Unknown => WireError::NotKnown(expected),
            _ => WireError::UnexpectedShape {
                expected,
                found: self.data.shape_name(),
            },
        }
    }

    /// Read a boolean payload
    pub fn as_bool(&self) -> Result<bool, WireError> {
        match &self.data {
            WireData::Bool(b) => Ok(*b),
            _ => Err(self.shape_error("bool")),
        }
    }

    /// Read a number payload
    pub fn as_number(&self) -> Result<&Number, WireError> {
        match &self.data {
            WireData::Number(n) => Ok(n),
            _ => Err(self.shape_error("number")),
        }
    }

    /// Read a string payload
    pub fn as_str(&self) -> Result<&str, WireError> {
        match &self.data {
            WireData::String(s) => Ok(s),
            _ => Err(self.shape_error("string")),
        }
    }

    /// Read list, set or tuple elements
    pub fn as_elements(&self) -> Result<&[WireValue], WireError> {
        match &self.data {
            WireData::List(elems) | WireData::Set(elems) | WireData::Tuple(elems) => Ok(elems),
            _ => Err(self.shape_error("list, set or tuple")),
        }
    }

    /// Read map entries or object attributes
    pub fn as_entries(&self) -> Result<&BTreeMap<String, WireValue>, WireError> {
        match &self.data {
            WireData::Map(entries) | WireData::Object(entries) => Ok(entries),
            _ => Err(self.shape_error("map or object")),
        }
    }

    /// Check that the payload agrees with the wire type, recursively
    pub fn conforms(&self) -> Result<(), WireError> {
        let nonconforming = |reason: String| WireError::Nonconforming {
            ty: self.ty.clone(),
            reason,
        };

        match (&self.ty, &self.data) {
            (_, WireData::Null | WireData::Unknown) => Ok(()),
            (WireType::Bool, WireData::Bool(_))
            | (WireType::Number, WireData::Number(_))
            | (WireType::String, WireData::String(_)) => Ok(()),
            (WireType::List(e), WireData::List(elems)) | (WireType::Set(e), WireData::Set(elems)) => {
                for (i, elem) in elems.iter().enumerate() {
                    if !e.accepts(&elem.ty) {
                        return Err(nonconforming(format!("element {} has type {}", i, elem.ty)));
                    }
                    elem.conforms()?;
                }
                Ok(())
            }
            (WireType::Map(e), WireData::Map(entries)) => {
                for (key, value) in entries {
                    if !e.accepts(&value.ty) {
                        return Err(nonconforming(format!("entry {:?} has type {}", key, value.ty)));
                    }
                    value.conforms()?;
                }
                Ok(())
            }
            (WireType::Object(attrs), WireData::Object(values)) => {
                if attrs.len() != values.len() {
                    return Err(nonconforming(format!(
                        "{} attributes declared, {} present",
                        attrs.len(),
                        values.len()
                    )));
                }
                for (name, ty) in attrs {
                    let value = values
                        .get(name)
                        .ok_or_else(|| nonconforming(format!("attribute {:?} missing", name)))?;
                    if !ty.accepts(&value.ty) {
                        return Err(nonconforming(format!(
                            "attribute {:?} has type {}",
                            name, value.ty
                        )));
                    }
                    value.conforms()?;
                }
                Ok(())
            }
            (WireType::Tuple(types), WireData::Tuple(elems)) => {
                if types.len() != elems.len() {
                    return Err(nonconforming(format!(
                        "{} elements declared, {} present",
                        types.len(),
                        elems.len()
                    )));
                }
                for (i, (ty, elem)) in types.iter().zip(elems).enumerate() {
                    if !ty.accepts(&elem.ty) {
                        return Err(nonconforming(format!("element {} has type {}", i, elem.ty)));
                    }
                    elem.conforms()?;
                }
                Ok(())
            }
            (ty, data) => Err(nonconforming(format!(
                "{} payload for {} type",
                data.shape_name(),
                ty.shape_name()
            ))),
        }
    }
}
