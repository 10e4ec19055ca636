//! Custom types
//!
//! A custom type layers plugin-defined behavior over one of the built-in
//! base types. The plugin implements [`Extension`], overriding only the hooks
//! it needs; every hook defaults to the base type's behavior, so an
//! extension that overrides nothing is indistinguishable from its base.
//!
//! | Hook | Default |
//! |------|---------|
//! | `type_equal` | base type equality |
//! | `validate` | base type validation |
//! | `value_from_wire` | base type decoding |
//! | `value_equal` | base value equality |
//!
//! The wire type of a custom type is always the wire type of its base and
//! cannot be overridden. The base type decodes the payload once and the
//! `value_from_wire` hook receives that value. The hook's result is checked:
//! it must be of the base variant and encode to the same wire payload as the
//! value it was given.
//!
//! # Example
//!
//! ```
//! use plugframe_core::{CustomType, Extension, Type, WireValue};
//!
//! #[derive(Debug)]
//! struct Hostname;
//!
//! impl Extension for Hostname {
//!     fn name(&self) -> &str {
//!         "HostnameType"
//!     }
//! }
//!
//! let ty = Type::Custom(CustomType::new(Type::String, Hostname));
//! assert_eq!(ty, Type::String);
//! assert_eq!(ty.to_string(), "HostnameType");
//! let value = ty.value_from_wire(&WireValue::string("example.com")).unwrap();
//! assert_eq!(value.to_wire(), WireValue::string("example.com"));
//! ```

use crate::diag::Diagnostics;
use crate::error::ConversionError;
use crate::path::AttributePath;
use crate::types::Type;
use crate::value::Value;
use crate::wire::WireValue;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Plugin-supplied behavior for a custom type
///
/// Implementations must be thread-safe: schemas holding custom types are
/// shared across concurrent requests.
pub trait Extension: fmt::Debug + Send + Sync {
    /// Name reported as the custom type's display name
    fn name(&self) -> &str;

    /// Type equality; `base` is this custom type's base type
    fn type_equal(&self, base: &Type, other: &Type) -> bool {
        base.equal(other)
    }

    /// Extra validation of a wire value before decoding
    fn validate(&self, base: &Type, wire: &WireValue, path: &AttributePath) -> Diagnostics {
        base.validate(wire, path)
    }

    /// Finish decoding `wire`; `decoded` is the base type's decoding of it
    ///
    /// Must return a value of the base type.
    fn value_from_wire(
        &self,
        _base: &Type,
        _wire: &WireValue,
        decoded: Value,
    ) -> Result<Value, ConversionError> {
        Ok(decoded)
    }

    /// Value equality; `base` is this value's underlying base value
    fn value_equal(&self, base: &Value, other: &Value) -> bool {
        base.equal(other)
    }
}

/// A base type paired with an extension
#[derive(Debug, Clone)]
pub struct CustomType {
    base: Box<Type>,
    ext: Arc<dyn Extension>,
}

impl CustomType {
    /// Layer `ext` over `base`
    pub fn new(base: Type, ext: impl Extension + 'static) -> Self {
        CustomType::from_arc(base, Arc::new(ext))
    }

    /// Layer a shared extension over `base`
    pub fn from_arc(base: Type, ext: Arc<dyn Extension>) -> Self {
        CustomType {
            base: Box::new(base),
            ext,
        }
    }

    /// The base type
    pub fn base(&self) -> &Type {
        &self.base
    }

    /// The extension's name
    pub fn name(&self) -> &str {
        self.ext.name()
    }

    /// The extension
    pub fn extension(&self) -> &Arc<dyn Extension> {
        &self.ext
    }

    /// Check if `other` is a custom type backed by the same extension
    ///
    /// Extensions are identified by name.
    pub fn is_same_extension(&self, other: &Type) -> bool {
        match other {
            Type::Custom(o) => o.name() == self.name(),
            _ => false,
        }
    }

    pub(crate) fn type_equal(&self, other: &Type) -> bool {
        self.ext.type_equal(&self.base, other)
    }

    /// Validate through the extension
    pub fn validate(&self, wire: &WireValue, path: &AttributePath) -> Diagnostics {
        self.ext.validate(&self.base, wire, path)
    }

    /// Decode through the extension and wrap the result
    pub fn value_from_wire(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        let plain = self.base.value_from_wire(wire)?;
        let plain_wire = plain.to_wire();
        let produced = match self.ext.value_from_wire(&self.base, wire, plain)? {
            Value::Custom(v) if v.ty.name() == self.name() => *v.base,
            other => other,
        };

        let found = produced.ty();
        if !self.base.equal(&found) {
            warn!(
                target: "plugframe::extension",
                custom = self.name(),
                expected = %self.base,
                found = %found,
                "Custom type produced a value of the wrong variant"
            );
            return Err(ConversionError::CustomVariantMismatch {
                custom: self.name().to_string(),
                expected: self.base.to_string(),
                found: found.to_string(),
            });
        }
        if produced.to_wire() != plain_wire {
            warn!(
                target: "plugframe::extension",
                custom = self.name(),
                "Custom type altered the wire payload"
            );
            return Err(ConversionError::PayloadAltered(self.name().to_string()));
        }
        Ok(self.wrap_unchecked(produced))
    }

    pub(crate) fn wrap_unchecked(&self, base: Value) -> Value {
        Value::Custom(CustomValue {
            ty: self.clone(),
            base: Box::new(base),
        })
    }
}

/// A base value tagged with its custom type
#[derive(Debug, Clone)]
pub struct CustomValue {
    ty: CustomType,
    base: Box<Value>,
}

impl CustomValue {
    /// Tag `base` with `ty`; the base value must have `ty`'s base type
    pub fn new(ty: CustomType, base: Value) -> Result<Self, ConversionError> {
        let found = base.ty();
        if !ty.base.equal(&found) {
            return Err(ConversionError::CustomVariantMismatch {
                custom: ty.name().to_string(),
                expected: ty.base.to_string(),
                found: found.to_string(),
            });
        }
        Ok(CustomValue {
            ty,
            base: Box::new(base),
        })
    }

    /// The underlying base value
    pub fn base(&self) -> &Value {
        &self.base
    }

    /// The custom type
    pub fn custom_type(&self) -> &CustomType {
        &self.ty
    }

    /// Equality through the extension
    pub fn equal(&self, other: &Value) -> bool {
        self.ty.ext.value_equal(&self.base, other)
    }
}
