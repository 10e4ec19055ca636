//! Value and type layer for plugframe
//!
//! This crate defines the typed value system plugins see:
//! - Number: arbitrary-precision decimal
//! - WireType / WireValue: untyped value trees as the transport delivers them
//! - JSON bridge: WireValue to and from `serde_json::Value`
//! - Type: type descriptors, decoding and validation of wire values
//! - Value: the three-state (Null / Unknown / Known) typed value algebra
//! - Extension: plugin-defined custom types layered over base types
//! - AttributePath / Diagnostics: locating and reporting problems
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diag;
pub mod error;
pub mod extension;
pub mod json;
pub mod number;
pub mod path;
pub mod types;
pub mod value;
pub mod wire;

pub use diag::{Diagnostic, Diagnostics, Severity};
pub use error::{ConversionError, NumberParseError, Result, ValueError, WireError};
pub use extension::{CustomType, CustomValue, Extension};
pub use json::{infer_wire_type, MAX_JSON_DEPTH};
pub use number::{Number, MAX_EXPONENT};
pub use path::{AttributePath, PathStep};
pub use types::{
    duplicate_wire_elements, provider_error_detail, report_duplicate_element, set_element_key,
    ObjectType, Type,
};
pub use value::{
    duplicate_indexes, BoolValue, DynamicValue, Float64Value, Int64Value, ListValue, MapValue,
    NumberValue, ObjectValue, SetValue, StringValue, TupleValue, Value, ValueState,
};
pub use wire::{WireData, WireType, WireValue};
