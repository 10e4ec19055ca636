//! Decode pipeline
//!
//! [`decode`] walks a wire value against a [`Schema`] depth-first and builds
//! the typed [`Value`] tree. Attributes are matched by name; leaves decode
//! through their [`Type`], nested nodes decode their children first and are
//! then wrapped into the derived Object/List/Set/Map value.
//!
//! ## Outcomes
//!
//! | Problem | Outcome |
//! |---------|---------|
//! | wire shape differs from the schema | `Err(DecodeError::Structural)` |
//! | schema deeper than `max_depth` | `Err(DecodeError::NestingTooDeep)` |
//! | deadline passed on entry | `Err(DecodeError::DeadlineExceeded)` |
//! | inexact numeric narrowing | diagnostic, null placeholder |
//! | duplicate set element, at any depth | diagnostic, first occurrence kept |
//! | null in a Required attribute | diagnostic |
//!
//! Ordering: lists keep source order, sets have no observable order, maps are
//! keyed.

use crate::attribute::{Attribute, AttributeKind, NestingMode};
use crate::config::DecodeConfig;
use crate::error::DecodeError;
use crate::object::NestedObject;
use crate::schema::Schema;
use plugframe_core::{
    duplicate_indexes, duplicate_wire_elements, report_duplicate_element, set_element_key,
    AttributePath, ConversionError, Diagnostics, ListValue, MapValue, ObjectValue, PathStep,
    SetValue, Type, Value, ValueError, WireData, WireError, WireValue,
};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Result of a successful decode
#[derive(Debug, Clone)]
pub struct Decoded {
    /// Best-effort typed value tree
    pub value: Value,
    /// User-level problems found along the way
    pub diagnostics: Diagnostics,
}

impl Decoded {
    /// Check if any error diagnostic was recorded
    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

/// Decode `wire` as a value of `schema`
pub fn decode(
    schema: &Schema,
    wire: &WireValue,
    config: &DecodeConfig,
) -> Result<Decoded, DecodeError> {
    if config.deadline_passed() {
        warn!(target: "plugframe::decode", "Deadline passed before decode");
        return Err(DecodeError::DeadlineExceeded);
    }
    debug!(target: "plugframe::decode", version = schema.version(), "Decode started");

    let mut decoder = Decoder {
        config,
        path: AttributePath::root(),
        diags: Diagnostics::new(),
    };
    let value = decoder.object(schema.root(), wire, 0).map_err(|e| {
        warn!(target: "plugframe::decode", error = %e, "Decode aborted");
        e
    })?;

    debug!(
        target: "plugframe::decode",
        diagnostics = decoder.diags.len(),
        errors = decoder.diags.error_count(),
        "Decode finished"
    );
    Ok(Decoded {
        value,
        diagnostics: decoder.diags,
    })
}

/// Detail text for a null value in a Required attribute
pub(crate) fn missing_required_detail(path: &AttributePath) -> String {
    format!(
        "Must set a configuration value for the {} attribute as the provider has marked it \
         as required.\n\nRefer to the provider documentation or contact the provider \
         developers for additional information about configurable attributes that are required.",
        path
    )
}

pub(crate) const MISSING_REQUIRED: &str = "Missing Configuration for Required Attribute";

struct Decoder<'a> {
    config: &'a DecodeConfig,
    path: AttributePath,
    diags: Diagnostics,
}

impl Decoder<'_> {
    fn structural(&self, source: impl Into<ConversionError>) -> DecodeError {
        DecodeError::Structural {
            path: self.path.clone(),
            source: source.into(),
        }
    }

    /// Check the wire shape; return the null or unknown value if not known
    fn unless_known(&self, ty: &Type, wire: &WireValue) -> Result<Option<Value>, DecodeError> {
        let expected = ty.wire_type();
        if !expected.accepts(wire.ty()) {
            return Err(self.structural(ConversionError::WireTypeMismatch {
                expected,
                found: wire.ty().clone(),
            }));
        }
        Ok(match wire.data() {
            WireData::Null => Some(ty.null_value()),
            WireData::Unknown => Some(ty.unknown_value()),
            _ => None,
        })
    }

    fn object(
        &mut self,
        object: &NestedObject,
        wire: &WireValue,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        if depth > self.config.max_depth {
            return Err(DecodeError::NestingTooDeep {
                path: self.path.clone(),
                max: self.config.max_depth,
            });
        }
        let object_type = object.object_type();
        if let Some(value) = self.unless_known(&Type::Object(object_type.clone()), wire)? {
            return Ok(value);
        }
        let entries = wire.as_entries().map_err(|e| self.structural(e))?;

        let mut values = BTreeMap::new();
        for (name, attr) in object.attributes() {
            self.path.push(PathStep::AttributeName(name.clone()));
            let value = self
                .child(wire, entries, name)
                .and_then(|child| self.attribute(attr, child, depth));
            self.path.pop();
            values.insert(name.clone(), value?);
        }
        for (name, block) in object.blocks() {
            self.path.push(PathStep::BlockName(name.clone()));
            let value = self
                .child(wire, entries, name)
                .and_then(|child| self.nested(block.nesting(), block.object(), child, depth));
            self.path.pop();
            values.insert(name.clone(), value?);
        }

        ObjectValue::new(object_type, values)
            .map(Value::Object)
            .map_err(|e| self.structural(e))
    }

    fn child<'w>(
        &self,
        parent: &WireValue,
        entries: &'w BTreeMap<String, WireValue>,
        name: &str,
    ) -> Result<&'w WireValue, DecodeError> {
        entries.get(name).ok_or_else(|| {
            self.structural(WireError::Nonconforming {
                ty: parent.ty().clone(),
                reason: format!("attribute {:?} missing", name),
            })
        })
    }

    fn attribute(
        &mut self,
        attr: &Attribute,
        wire: &WireValue,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        trace!(target: "plugframe::decode", path = %self.path, "Decoding attribute");
        let value = match attr.kind() {
            AttributeKind::Leaf(ty) => self.leaf(attr, ty, wire)?,
            AttributeKind::Nested { nesting, object } => self.nested(*nesting, object, wire, depth)?,
        };
        if self.config.enforce_required && attr.is_required() && value.is_null() {
            self.diags.add_attribute_error(
                &self.path,
                MISSING_REQUIRED,
                missing_required_detail(&self.path),
            );
        }
        Ok(value)
    }

    fn leaf(&mut self, attr: &Attribute, ty: &Type, wire: &WireValue) -> Result<Value, DecodeError> {
        match ty.value_from_wire(wire) {
            Ok(value) => Ok(value),
            Err(err) if err.is_fatal() => Err(self.structural(err)),
            Err(err) => self.recover_leaf(attr, ty, wire, &err),
        }
    }

    /// Best-effort value for a leaf that failed with a user-level error
    fn recover_leaf(
        &mut self,
        attr: &Attribute,
        ty: &Type,
        wire: &WireValue,
        err: &ConversionError,
    ) -> Result<Value, DecodeError> {
        let mut err = err.clone();
        if let ConversionError::Value(ValueError::DuplicateSetElement { .. }) = err {
            let mut found = Diagnostics::new();
            match ty.value_from_wire_keep_first(wire, &self.path, &mut found) {
                Ok(value) => {
                    debug!(
                        target: "plugframe::decode",
                        path = %self.path,
                        dropped = found.len(),
                        "Dropped repeated set elements"
                    );
                    self.diags.append(found);
                    return Ok(value);
                }
                Err(next) if next.is_fatal() => return Err(self.structural(next)),
                Err(next) => {
                    self.diags.append(found);
                    err = next;
                }
            }
        }

        let detail = if attr.is_sensitive() {
            "The value of a sensitive attribute could not be converted to its declared type."
                .to_string()
        } else {
            err.to_string()
        };
        self.diags
            .add_attribute_error(&self.path, "Value Conversion Error", detail);
        Ok(ty.null_value())
    }

    /// Make recovered set elements distinct again
    ///
    /// Placeholders left by recovery can make elements that differ on the
    /// wire compare equal. The recovered side of such a pair becomes unknown.
    fn settle_recovered(
        &mut self,
        element_type: &Type,
        values: &mut Vec<Value>,
        recovered: &mut Vec<bool>,
    ) {
        while let Some(&i) = duplicate_indexes(values).first() {
            let j = (0..i)
                .find(|&j| values[j].is_fully_known() && values[j].equal(&values[i]))
                .unwrap_or(i);
            let target = if recovered[i] {
                i
            } else if recovered[j] {
                j
            } else {
                report_duplicate_element(&mut self.diags, &self.path, &values[i]);
                values.remove(i);
                recovered.remove(i);
                continue;
            };
            debug!(
                target: "plugframe::decode",
                path = %self.path,
                index = target,
                "Recovered set element collides; marking unknown"
            );
            values[target] = element_type.unknown_value();
        }
    }

    fn nested(
        &mut self,
        nesting: NestingMode,
        object: &NestedObject,
        wire: &WireValue,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let object_type = object.ty();
        match nesting {
            NestingMode::Single => self.object(object, wire, depth + 1),
            NestingMode::List => {
                if let Some(value) = self.unless_known(&Type::list(object_type.clone()), wire)? {
                    return Ok(value);
                }
                let elems = wire.as_elements().map_err(|e| self.structural(e))?;
                let mut values = Vec::with_capacity(elems.len());
                for (i, elem) in elems.iter().enumerate() {
                    self.path.push(PathStep::ListIndex(i));
                    let value = self.object(object, elem, depth + 1);
                    self.path.pop();
                    values.push(value?);
                }
                ListValue::new(object_type, values)
                    .map(Value::List)
                    .map_err(|e| self.structural(e))
            }
            NestingMode::Set => {
                if let Some(value) = self.unless_known(&Type::set(object_type.clone()), wire)? {
                    return Ok(value);
                }
                let elems = wire.as_elements().map_err(|e| self.structural(e))?;
                let duplicates = duplicate_wire_elements(&object_type, elems);
                let mut values = Vec::with_capacity(elems.len());
                let mut recovered = Vec::with_capacity(elems.len());
                for (i, elem) in elems.iter().enumerate() {
                    let key = set_element_key(&object_type, elem);
                    if duplicates.contains(&i) {
                        report_duplicate_element(&mut self.diags, &self.path, &key);
                        continue;
                    }
                    let errors = self.diags.error_count();
                    self.path.push(PathStep::SetElement(Box::new(key)));
                    let value = self.object(object, elem, depth + 1);
                    self.path.pop();
                    values.push(value?);
                    recovered.push(self.diags.error_count() > errors);
                }
                self.settle_recovered(&object_type, &mut values, &mut recovered);
                SetValue::new(object_type, values)
                    .map(Value::Set)
                    .map_err(|e| self.structural(e))
            }
            NestingMode::Map => {
                if let Some(value) = self.unless_known(&Type::map(object_type.clone()), wire)? {
                    return Ok(value);
                }
                let entries = wire.as_entries().map_err(|e| self.structural(e))?;
                let mut values = BTreeMap::new();
                for (key, elem) in entries {
                    self.path.push(PathStep::MapKey(key.clone()));
                    let value = self.object(object, elem, depth + 1);
                    self.path.pop();
                    values.insert(key.clone(), value?);
                }
                MapValue::new(object_type, values)
                    .map(Value::Map)
                    .map_err(|e| self.structural(e))
            }
        }
    }
}
