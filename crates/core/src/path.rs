//! Attribute paths
//!
//! An [`AttributePath`] locates a value inside a schema-shaped value tree. It
//! is attached to every diagnostic and is built step by step while the decode
//! and validation passes walk the schema.
//!
//! | Step | Rendering | Example |
//! |------|-----------|---------|
//! | `AttributeName` | `name` | `.tags` |
//! | `BlockName` | `name` | `.rule` |
//! | `ListIndex` | `[n]` | `[0]` |
//! | `SetElement` | `[Value(v)]` | `[Value("a")]` |
//! | `MapKey` | `["k"]` | `["env"]` |
//!
//! Attribute and block steps render identically but are distinct steps: the
//! configuration language writes one as `name = value` and the other as
//! `name { ... }`.

use crate::value::Value;
use smallvec::SmallVec;
use std::fmt;

/// One step of an attribute path
#[derive(Debug, Clone, PartialEq)]
pub enum PathStep {
    /// Attribute set with assignment syntax
    AttributeName(String),
    /// Block written with brace syntax
    BlockName(String),
    /// Element of a list
    ListIndex(usize),
    /// Element of a set, identified by its value
    SetElement(Box<Value>),
    /// Entry of a map
    MapKey(String),
}

impl PathStep {
    /// Check if this step selects a named attribute or block
    pub fn is_name(&self) -> bool {
        matches!(self, PathStep::AttributeName(_) | PathStep::BlockName(_))
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::AttributeName(name) | PathStep::BlockName(name) => write!(f, "{}", name),
            PathStep::ListIndex(i) => write!(f, "[{}]", i),
            PathStep::SetElement(value) => write!(f, "[Value({})]", value),
            PathStep::MapKey(key) => write!(f, "[{:?}]", key),
        }
    }
}

/// Ordered sequence of steps from the schema root
///
/// # Examples
///
/// ```
/// use plugframe_core::AttributePath;
///
/// let path = AttributePath::root()
///     .block("list_nested_block")
///     .index(1)
///     .attribute("bool_attribute");
/// assert_eq!(path.to_string(), "list_nested_block[1].bool_attribute");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributePath {
    steps: SmallVec<[PathStep; 8]>,
}

impl AttributePath {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        AttributePath {
            steps: SmallVec::new(),
        }
    }

    /// Create a path from a vector of steps
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        AttributePath {
            steps: SmallVec::from_vec(steps),
        }
    }

    /// Get the path steps
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Get the number of steps in the path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if this is the root path
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append an attribute-name step (builder pattern)
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.steps.push(PathStep::AttributeName(name.into()));
        self
    }

    /// Append a block-name step (builder pattern)
    pub fn block(mut self, name: impl Into<String>) -> Self {
        self.steps.push(PathStep::BlockName(name.into()));
        self
    }

    /// Append a list-index step (builder pattern)
    pub fn index(mut self, index: usize) -> Self {
        self.steps.push(PathStep::ListIndex(index));
        self
    }

    /// Append a set-element step (builder pattern)
    pub fn set_element(mut self, element: Value) -> Self {
        self.steps.push(PathStep::SetElement(Box::new(element)));
        self
    }

    /// Append a map-key step (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.steps.push(PathStep::MapKey(key.into()));
        self
    }

    /// Push a step (mutating)
    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    /// Pop the last step (mutating)
    pub fn pop(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    /// Copy of this path with one more step
    pub fn with(&self, step: PathStep) -> Self {
        let mut next = self.clone();
        next.steps.push(step);
        next
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<AttributePath> {
        if self.steps.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.steps.pop();
            Some(parent)
        }
    }

    /// Get the last step (None if root)
    pub fn last_step(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// Check if this path is a prefix of another (or equal)
    pub fn is_ancestor_of(&self, other: &AttributePath) -> bool {
        self.steps.len() <= other.steps.len()
            && self.steps.iter().zip(other.steps.iter()).all(|(a, b)| a == b)
    }

    /// Check if another path is a prefix of this one (or equal)
    pub fn is_descendant_of(&self, other: &AttributePath) -> bool {
        other.is_ancestor_of(self)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && step.is_name() {
                write!(f, ".")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromIterator<PathStep> for AttributePath {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        AttributePath {
            steps: iter.into_iter().collect(),
        }
    }
}
