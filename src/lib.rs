//! plugframe - schema and type layer for infrastructure plugins
//!
//! Plugins exchange configuration, state and plans with their host as
//! untyped wire payloads. plugframe gives those payloads a typed shape:
//! a three-state value algebra, type descriptors, plugin-defined custom
//! types, and a schema tree that decodes and validates whole payloads.
//!
//! # Quick Start
//!
//! ```
//! use plugframe::{decode, Attribute, DecodeConfig, Schema, WireValue};
//!
//! let schema = Schema::builder()
//!     .attribute("name", Attribute::string().required())
//!     .attribute("port", Attribute::int64().optional())
//!     .build()
//!     .unwrap();
//!
//! let wire = WireValue::object([
//!     ("name", WireValue::string("web")),
//!     ("port", WireValue::number(8080i64)),
//! ]);
//! let decoded = decode(&schema, &wire, &DecodeConfig::default()).unwrap();
//! assert!(!decoded.has_error());
//! assert_eq!(decoded.value.to_wire(), wire);
//! ```
//!
//! # Architecture
//!
//! - `plugframe-core`: numbers, wire values, values, types, extensions,
//!   paths and diagnostics
//! - `plugframe-schema`: schema model, decode pipeline, validation pass

pub use plugframe_core::*;
pub use plugframe_schema::{
    apply_plan_modifiers, decode, resolve_default, validate, validate_name, Attribute,
    AttributeKind, Block, DecodeConfig, DecodeError, Decoded, DefaultValue, LengthBetween,
    NestedObject, NestedObjectBuilder, NestingMode, OneOf, PlanModifier, PlanRequest, Schema,
    SchemaBuilder, SchemaCell, SchemaError, SchemaNode, SchemaResult, StaticDefault,
    UseStateForUnknown, Validator, DEFAULT_MAX_DEPTH,
};
