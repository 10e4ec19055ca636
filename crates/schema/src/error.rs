//! Error types for plugframe-schema
//!
//! - [`SchemaError`]: a schema declaration that breaks a construction rule.
//!   Raised once, when the schema is built at plugin start-up.
//! - [`DecodeError`]: a fatal decode outcome. User-level problems are never
//!   reported here; they become diagnostics next to the decoded value.

use plugframe_core::{AttributePath, ConversionError};
use thiserror::Error;

/// Result type alias for schema construction
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema declaration rule violation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Name does not match `^[a-z_][a-z0-9_]*$`
    #[error("invalid name {name:?}: {reason}")]
    InvalidName {
        /// The offending name
        name: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Two attributes or blocks in one nested object share a name
    #[error("duplicate name {0:?}: attribute and block names must be unique within an object")]
    DuplicateName(String),

    /// Two behavior flags that exclude each other are both set
    #[error("attribute {name:?} cannot be both {first} and {second}")]
    ConflictingFlags {
        /// Attribute name
        name: String,
        /// First flag
        first: &'static str,
        /// Second flag
        second: &'static str,
    },

    /// None of Required, Optional and Computed is set
    #[error("attribute {0:?} must be Required, Optional or Computed")]
    MissingFlags(String),

    /// Nested attribute declares no children
    #[error("nested attribute {0:?} must declare at least one attribute")]
    EmptyNestedObject(String),

    /// Block item bounds are inverted
    #[error("block {name:?} has min_items {min} greater than max_items {max}")]
    InvalidItemBounds {
        /// Block name
        name: String,
        /// Declared minimum
        min: usize,
        /// Declared maximum
        max: usize,
    },

    /// Item bounds on a single-nested block
    #[error("block {0:?} is single-nested and cannot declare item bounds")]
    BoundsOnSingleBlock(String),

    /// Default declared on an attribute that is not Computed
    #[error("attribute {0:?} declares a default value but is not Computed")]
    DefaultRequiresComputed(String),
}

/// Fatal decode outcome
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// Wire shape disagrees with the schema
    #[error("structural mismatch at {}: {source}", display_path(.path))]
    Structural {
        /// Where the mismatch was found
        path: AttributePath,
        /// The conversion failure
        source: ConversionError,
    },

    /// Schema walk went deeper than the configured limit
    #[error("nesting at {} exceeds maximum depth of {max}", display_path(.path))]
    NestingTooDeep {
        /// Where the limit was hit
        path: AttributePath,
        /// Configured maximum
        max: usize,
    },

    /// Caller's deadline had already passed on entry
    #[error("deadline exceeded before decoding started")]
    DeadlineExceeded,
}

fn display_path(path: &AttributePath) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}
