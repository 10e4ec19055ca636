//! Blocks
//!
//! A [`Block`] is a schema node written with brace syntax (`name { ... }`).
//! It always wraps a [`NestedObject`], repeated once (Single), as an ordered
//! list (List) or as a set of unique objects (Set). List and set blocks may
//! bound how many times they appear.

use crate::attribute::NestingMode;
use crate::error::SchemaError;
use crate::object::NestedObject;
use plugframe_core::Type;

/// Schema block
#[derive(Debug, Clone)]
pub struct Block {
    nesting: NestingMode,
    object: NestedObject,
    min_items: Option<usize>,
    max_items: Option<usize>,
    description: Option<String>,
    deprecation_message: Option<String>,
}

impl Block {
    fn with_nesting(nesting: NestingMode, object: NestedObject) -> Self {
        Block {
            nesting,
            object,
            min_items: None,
            max_items: None,
            description: None,
            deprecation_message: None,
        }
    }

    /// Block appearing at most once
    pub fn single(object: NestedObject) -> Self {
        Block::with_nesting(NestingMode::Single, object)
    }

    /// Block repeated as an ordered list
    pub fn list(object: NestedObject) -> Self {
        Block::with_nesting(NestingMode::List, object)
    }

    /// Block repeated as a set
    pub fn set(object: NestedObject) -> Self {
        Block::with_nesting(NestingMode::Set, object)
    }

    /// Require at least `n` items
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    /// Allow at most `n` items
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Set the description
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Mark deprecated with a message shown when the block is present
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecation_message = Some(message.into());
        self
    }

    /// Repetition
    pub fn nesting(&self) -> NestingMode {
        self.nesting
    }

    /// Children
    pub fn object(&self) -> &NestedObject {
        &self.object
    }

    /// Derived type of this block's value
    pub fn ty(&self) -> Type {
        self.nesting.wrap(self.object.ty())
    }

    /// Minimum item count, if bounded
    pub fn get_min_items(&self) -> Option<usize> {
        self.min_items
    }

    /// Maximum item count, if bounded
    pub fn get_max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Description, if set
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Deprecation message, if deprecated
    pub fn deprecation_message(&self) -> Option<&str> {
        self.deprecation_message.as_deref()
    }

    pub(crate) fn check(&self, name: &str) -> Result<(), SchemaError> {
        if self.nesting == NestingMode::Single
            && (self.min_items.is_some() || self.max_items.is_some())
        {
            return Err(SchemaError::BoundsOnSingleBlock(name.to_string()));
        }
        if let (Some(min), Some(max)) = (self.min_items, self.max_items) {
            if min > max {
                return Err(SchemaError::InvalidItemBounds {
                    name: name.to_string(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}
