//! Schema model and conversion pipeline for plugframe
//!
//! This crate describes plugin configuration shapes and converts untyped
//! wire payloads into typed values against them:
//! - Attribute / Block / NestedObject / Schema: the schema tree and builders
//! - plan: validator, default and plan-modifier hooks
//! - decode: wire value to typed value, collecting diagnostics
//! - validate: full validation pass that reports every problem
//! - DecodeConfig: limits and switches for both passes
//! - SchemaCell: publish-once shared schema

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod block;
pub mod cell;
pub mod config;
pub mod decode;
pub mod error;
pub mod object;
pub mod plan;
pub mod schema;
pub mod validate;

pub use attribute::{Attribute, AttributeKind, NestingMode};
pub use block::Block;
pub use cell::SchemaCell;
pub use config::{DecodeConfig, DEFAULT_MAX_DEPTH};
pub use decode::{decode, Decoded};
pub use error::{DecodeError, Result as SchemaResult, SchemaError};
pub use object::{validate_name, NestedObject, NestedObjectBuilder};
pub use plan::{
    apply_plan_modifiers, resolve_default, DefaultValue, LengthBetween, OneOf, PlanModifier,
    PlanRequest, StaticDefault, UseStateForUnknown, Validator,
};
pub use schema::{Schema, SchemaBuilder, SchemaNode};
pub use validate::validate;
