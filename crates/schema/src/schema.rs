//! Schema root
//!
//! A [`Schema`] is the root [`NestedObject`] of a resource, data source or
//! plugin configuration, plus a version and documentation. Schemas are built
//! once at start-up and never change afterwards; share them behind an `Arc`
//! (see [`SchemaCell`](crate::SchemaCell)).
//!
//! # Example
//!
//! ```
//! use plugframe_schema::{Attribute, Block, NestedObject, Schema};
//!
//! let rule = NestedObject::builder()
//!     .attribute("port", Attribute::int64().required())
//!     .build()
//!     .unwrap();
//! let schema = Schema::builder()
//!     .version(1)
//!     .attribute("name", Attribute::string().required())
//!     .block("rule", Block::list(rule))
//!     .build()
//!     .unwrap();
//! assert_eq!(schema.version(), 1);
//! ```

use crate::attribute::{Attribute, AttributeKind};
use crate::block::Block;
use crate::error::SchemaError;
use crate::object::{NestedObject, NestedObjectBuilder};
use plugframe_core::{AttributePath, PathStep, Type};
use tracing::debug;

/// A schema node reached by a path
#[derive(Debug, Clone, Copy)]
pub enum SchemaNode<'a> {
    /// An attribute
    Attribute(&'a Attribute),
    /// A block
    Block(&'a Block),
}

/// Root of a schema tree
#[derive(Debug, Clone)]
pub struct Schema {
    version: i64,
    description: Option<String>,
    deprecation_message: Option<String>,
    root: NestedObject,
}

impl Schema {
    /// Start building a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Schema version, for state upgrades
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Description, if set
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Deprecation message, if deprecated
    pub fn deprecation_message(&self) -> Option<&str> {
        self.deprecation_message.as_deref()
    }

    /// Root attributes and blocks
    pub fn root(&self) -> &NestedObject {
        &self.root
    }

    /// Object type of the whole schema
    pub fn ty(&self) -> Type {
        self.root.ty()
    }

    /// Type of the value at `path`
    pub fn type_at_path(&self, path: &AttributePath) -> Option<Type> {
        path.steps()
            .iter()
            .try_fold(self.ty(), |ty, step| ty.apply_step(step))
    }

    /// Attribute or block declared at `path`
    ///
    /// Element steps (index, set element, map key) pass through to the
    /// repeated object; the path must end on a name step.
    pub fn node_at_path(&self, path: &AttributePath) -> Option<SchemaNode<'_>> {
        let mut object = Some(&self.root);
        let mut node = None;
        for step in path.steps() {
            if let PathStep::AttributeName(name) | PathStep::BlockName(name) = step {
                let current = object?;
                let next = match (current.attribute(name), current.block(name)) {
                    (Some(attr), _) => SchemaNode::Attribute(attr),
                    (None, Some(block)) => SchemaNode::Block(block),
                    (None, None) => return None,
                };
                object = next.nested_object();
                node = Some(next);
            }
        }
        match path.last_step() {
            Some(step) if step.is_name() => node,
            _ => None,
        }
    }

    /// Attribute declared at `path`
    pub fn attribute_at_path(&self, path: &AttributePath) -> Option<&Attribute> {
        match self.node_at_path(path)? {
            SchemaNode::Attribute(attr) => Some(attr),
            SchemaNode::Block(_) => None,
        }
    }
}

impl<'a> SchemaNode<'a> {
    /// Nested object below this node, if any
    pub fn nested_object(self) -> Option<&'a NestedObject> {
        match self {
            SchemaNode::Attribute(attr) => match attr.kind() {
                AttributeKind::Nested { object, .. } => Some(object),
                AttributeKind::Leaf(_) => None,
            },
            SchemaNode::Block(block) => Some(block.object()),
        }
    }

    /// Derived type of this node
    pub fn ty(self) -> Type {
        match self {
            SchemaNode::Attribute(attr) => attr.ty(),
            SchemaNode::Block(block) => block.ty(),
        }
    }
}

/// Builder for [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    version: i64,
    description: Option<String>,
    deprecation_message: Option<String>,
    root: NestedObjectBuilder,
}

impl SchemaBuilder {
    /// Set the version
    pub fn version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    /// Set the description
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Mark the whole schema deprecated
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecation_message = Some(message.into());
        self
    }

    /// Add a root attribute
    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.root = self.root.attribute(name, attribute);
        self
    }

    /// Add a root block
    pub fn block(mut self, name: impl Into<String>, block: Block) -> Self {
        self.root = self.root.block(name, block);
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<Schema, SchemaError> {
        let root = self.root.build()?;
        debug!(
            target: "plugframe::schema",
            version = self.version,
            attributes = root.attributes().len(),
            blocks = root.blocks().len(),
            depth = root.depth(),
            "Schema built"
        );
        Ok(Schema {
            version: self.version,
            description: self.description,
            deprecation_message: self.deprecation_message,
            root,
        })
    }
}
