//! Nested objects
//!
//! A [`NestedObject`] is the name-to-node mapping at one level of a schema:
//! attributes and blocks side by side, with names unique across both.
//!
//! ## Names
//!
//! Names must:
//! - Be non-empty
//! - Start with a lowercase letter or underscore
//! - Contain only lowercase letters, digits and underscores

use crate::attribute::Attribute;
use crate::block::Block;
use crate::error::SchemaError;
use plugframe_core::{ObjectType, Type};
use std::collections::BTreeMap;

/// Attributes and blocks at one schema level
#[derive(Debug, Clone, Default)]
pub struct NestedObject {
    attributes: BTreeMap<String, Attribute>,
    blocks: BTreeMap<String, Block>,
}

impl NestedObject {
    /// Start building a nested object
    pub fn builder() -> NestedObjectBuilder {
        NestedObjectBuilder::default()
    }

    /// Attributes, ordered by name
    pub fn attributes(&self) -> &BTreeMap<String, Attribute> {
        &self.attributes
    }

    /// Blocks, ordered by name
    pub fn blocks(&self) -> &BTreeMap<String, Block> {
        &self.blocks
    }

    /// Attribute `name`
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Block `name`
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    /// Object type over every attribute and block
    pub fn object_type(&self) -> ObjectType {
        ObjectType::new(
            self.attributes
                .iter()
                .map(|(name, attr)| (name.clone(), attr.ty()))
                .chain(
                    self.blocks
                        .iter()
                        .map(|(name, block)| (name.clone(), block.ty())),
                ),
        )
    }

    /// [`Self::object_type`] as a [`Type`]
    pub fn ty(&self) -> Type {
        Type::Object(self.object_type())
    }

    /// Depth of the deepest nested object below this one
    pub fn depth(&self) -> usize {
        let attrs = self
            .attributes
            .values()
            .filter_map(Attribute::nested_object)
            .map(|o| o.depth() + 1);
        let blocks = self.blocks.values().map(|b| b.object().depth() + 1);
        attrs.chain(blocks).max().unwrap_or(0)
    }
}

/// Builder for [`NestedObject`]
///
/// Rules are checked in [`NestedObjectBuilder::build`], so a finished object
/// is always valid.
#[derive(Debug, Default)]
pub struct NestedObjectBuilder {
    attributes: Vec<(String, Attribute)>,
    blocks: Vec<(String, Block)>,
}

impl NestedObjectBuilder {
    /// Add an attribute
    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.push((name.into(), attribute));
        self
    }

    /// Add a block
    pub fn block(mut self, name: impl Into<String>, block: Block) -> Self {
        self.blocks.push((name.into(), block));
        self
    }

    /// Validate names and nodes and build the object
    pub fn build(self) -> Result<NestedObject, SchemaError> {
        let mut object = NestedObject::default();
        for (name, attribute) in self.attributes {
            validate_name(&name)?;
            attribute.check(&name)?;
            if object.blocks.contains_key(&name) || object.attributes.contains_key(&name) {
                return Err(SchemaError::DuplicateName(name));
            }
            object.attributes.insert(name, attribute);
        }
        for (name, block) in self.blocks {
            validate_name(&name)?;
            block.check(&name)?;
            if object.blocks.contains_key(&name) || object.attributes.contains_key(&name) {
                return Err(SchemaError::DuplicateName(name));
            }
            object.blocks.insert(name, block);
        }
        Ok(object)
    }
}

/// Check a node name against `^[a-z_][a-z0-9_]*$`
pub fn validate_name(name: &str) -> Result<(), SchemaError> {
    let invalid = |reason| SchemaError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("name cannot be empty"));
    };
    if !(first.is_ascii_lowercase() || first == '_') {
        return Err(invalid("must start with a lowercase letter or underscore"));
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(invalid(
            "must contain only lowercase letters, digits and underscores",
        ));
    }
    Ok(())
}
