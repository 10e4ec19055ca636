//! Validation pass
//!
//! [`validate`] walks a wire value against a [`Schema`] without building
//! typed values and collects every problem it finds. It never stops early:
//! a tree with N independent invalid leaves yields N diagnostics.
//!
//! Checks, per node:
//! - wire shape and domain constraints of leaf types (`Type::validate`)
//! - declared attributes and blocks missing from an object payload
//! - null in a Required attribute
//! - duplicate elements in set-nested attributes and blocks
//! - item bounds of list and set blocks
//! - deprecation warnings for attributes and blocks that are set
//! - attribute validators, on known values

use crate::attribute::{Attribute, AttributeKind, NestingMode};
use crate::block::Block;
use crate::config::DecodeConfig;
use crate::decode::{missing_required_detail, MISSING_REQUIRED};
use crate::object::NestedObject;
use crate::schema::Schema;
use plugframe_core::{
    duplicate_wire_elements, provider_error_detail, report_duplicate_element, set_element_key,
    AttributePath, Diagnostics, PathStep, Type, WireError, WireValue,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Validate `wire` against `schema`, collecting every diagnostic
pub fn validate(schema: &Schema, wire: &WireValue, config: &DecodeConfig) -> Diagnostics {
    let mut diags = Diagnostics::new();
    if config.deadline_passed() {
        diags.add_error(
            "Deadline Exceeded",
            "The request deadline passed before validation started.",
        );
        return diags;
    }
    debug!(target: "plugframe::validate", version = schema.version(), "Validation started");

    let mut walker = Walker {
        config,
        path: AttributePath::root(),
        diags,
    };
    walker.object(schema.root(), wire, 0);

    debug!(
        target: "plugframe::validate",
        diagnostics = walker.diags.len(),
        errors = walker.diags.error_count(),
        "Validation finished"
    );
    walker.diags
}

struct Walker<'a> {
    config: &'a DecodeConfig,
    path: AttributePath,
    diags: Diagnostics,
}

impl Walker<'_> {
    fn provider_error(&mut self, ty: &Type, reason: impl fmt::Display) {
        self.diags.add_attribute_error(
            &self.path,
            format!("{} Type Validation Error", ty.kind_label()),
            provider_error_detail(reason),
        );
    }

    /// Check the wire shape; true if a known payload should be walked
    fn walkable(&mut self, ty: &Type, wire: &WireValue) -> bool {
        let expected = ty.wire_type();
        if !expected.accepts(wire.ty()) {
            self.provider_error(
                ty,
                format!("Expected {} value, received {} value", expected, wire.ty()),
            );
            return false;
        }
        !wire.is_null() && wire.is_known()
    }

    fn object(&mut self, object: &NestedObject, wire: &WireValue, depth: usize) {
        if depth > self.config.max_depth {
            self.diags.add_attribute_error(
                &self.path,
                "Nesting Too Deep",
                format!(
                    "Configuration nesting exceeds the maximum depth of {}.",
                    self.config.max_depth
                ),
            );
            return;
        }
        let ty = object.ty();
        if !self.walkable(&ty, wire) {
            return;
        }
        let entries = match wire.as_entries() {
            Ok(entries) => entries,
            Err(e) => return self.provider_error(&ty, e),
        };

        for (name, attr) in object.attributes() {
            if let Some(child) = self.child(&ty, wire, entries, name) {
                self.path.push(PathStep::AttributeName(name.clone()));
                self.attribute(attr, child, depth);
                self.path.pop();
            }
        }
        for (name, block) in object.blocks() {
            if let Some(child) = self.child(&ty, wire, entries, name) {
                self.path.push(PathStep::BlockName(name.clone()));
                self.block(name, block, child, depth);
                self.path.pop();
            }
        }
    }

    /// Payload of a declared child; reported against the object if absent
    fn child<'w>(
        &mut self,
        ty: &Type,
        parent: &WireValue,
        entries: &'w BTreeMap<String, WireValue>,
        name: &str,
    ) -> Option<&'w WireValue> {
        let child = entries.get(name);
        if child.is_none() {
            self.provider_error(
                ty,
                WireError::Nonconforming {
                    ty: parent.ty().clone(),
                    reason: format!("attribute {:?} missing", name),
                },
            );
        }
        child
    }

    fn attribute(&mut self, attr: &Attribute, wire: &WireValue, depth: usize) {
        trace!(target: "plugframe::validate", path = %self.path, "Validating attribute");

        if self.config.enforce_required && attr.is_required() && wire.is_null() {
            self.diags.add_attribute_error(
                &self.path,
                MISSING_REQUIRED,
                missing_required_detail(&self.path),
            );
        }
        if let Some(message) = attr.deprecation_message() {
            if !wire.is_null() {
                self.diags
                    .add_attribute_warning(&self.path, "Attribute Deprecated", message);
            }
        }

        match attr.kind() {
            AttributeKind::Leaf(ty) => self.diags.append(ty.validate(wire, &self.path)),
            AttributeKind::Nested { nesting, object } => {
                self.nested(*nesting, object, wire, depth)
            }
        }

        if self.config.run_validators
            && !attr.validators().is_empty()
            && !wire.is_null()
            && wire.is_known()
        {
            if let Ok(value) = attr.ty().value_from_wire(wire) {
                for validator in attr.validators() {
                    validator.validate(&value, &self.path, &mut self.diags);
                }
            }
        }
    }

    fn block(&mut self, name: &str, block: &Block, wire: &WireValue, depth: usize) {
        trace!(target: "plugframe::validate", path = %self.path, "Validating block");

        if let Some(message) = block.deprecation_message() {
            let present = match wire.as_elements() {
                Ok(elems) => !elems.is_empty(),
                Err(_) => !wire.is_null(),
            };
            if present {
                self.diags
                    .add_attribute_warning(&self.path, "Block Deprecated", message);
            }
        }

        self.nested(block.nesting(), block.object(), wire, depth);

        if !wire.is_known() {
            return;
        }
        let count = wire.as_elements().map_or(0, <[WireValue]>::len);
        if let Some(min) = block.get_min_items() {
            if count < min {
                self.diags.add_attribute_error(
                    &self.path,
                    "Too Few Blocks",
                    format!("At least {} \"{}\" blocks are required.", min, name),
                );
            }
        }
        if let Some(max) = block.get_max_items() {
            if count > max {
                self.diags.add_attribute_error(
                    &self.path,
                    "Too Many Blocks",
                    format!("No more than {} \"{}\" blocks are allowed.", max, name),
                );
            }
        }
    }

    fn nested(&mut self, nesting: NestingMode, object: &NestedObject, wire: &WireValue, depth: usize) {
        let object_type = object.ty();
        match nesting {
            NestingMode::Single => self.object(object, wire, depth + 1),
            NestingMode::List => {
                let ty = Type::list(object_type);
                if !self.walkable(&ty, wire) {
                    return;
                }
                let elems = match wire.as_elements() {
                    Ok(elems) => elems,
                    Err(e) => return self.provider_error(&ty, e),
                };
                for (i, elem) in elems.iter().enumerate() {
                    self.path.push(PathStep::ListIndex(i));
                    self.object(object, elem, depth + 1);
                    self.path.pop();
                }
            }
            NestingMode::Set => {
                let ty = Type::set(object_type.clone());
                if !self.walkable(&ty, wire) {
                    return;
                }
                let elems = match wire.as_elements() {
                    Ok(elems) => elems,
                    Err(e) => return self.provider_error(&ty, e),
                };
                let keys: Vec<_> = elems
                    .iter()
                    .map(|elem| set_element_key(&object_type, elem))
                    .collect();
                for (elem, key) in elems.iter().zip(&keys) {
                    self.path.push(PathStep::SetElement(Box::new(key.clone())));
                    self.object(object, elem, depth + 1);
                    self.path.pop();
                }
                for i in duplicate_wire_elements(&object_type, elems) {
                    report_duplicate_element(&mut self.diags, &self.path, &keys[i]);
                }
            }
            NestingMode::Map => {
                let ty = Type::map(object_type);
                if !self.walkable(&ty, wire) {
                    return;
                }
                let entries = match wire.as_entries() {
                    Ok(entries) => entries,
                    Err(e) => return self.provider_error(&ty, e),
                };
                for (key, elem) in entries {
                    self.path.push(PathStep::MapKey(key.clone()));
                    self.object(object, elem, depth + 1);
                    self.path.pop();
                }
            }
        }
    }
}
