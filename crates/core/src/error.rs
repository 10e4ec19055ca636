//! Error types for plugframe-core
//!
//! This module defines the error types raised while building values,
//! reading wire payloads, and converting wire payloads into typed values.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Two tiers
//!
//! [`ConversionError::is_fatal`] splits conversion failures into:
//! - **framework errors**: the wire shape does not match the static type.
//!   These abort a decode and indicate a plugin bug.
//! - **user errors**: the payload is well-formed but violates a domain rule
//!   (precision loss on narrowing, duplicate set elements). These become
//!   diagnostics and decoding continues.

use crate::wire::WireType;
use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Error parsing decimal text into a [`Number`](crate::Number)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberParseError {
    /// Input was empty
    #[error("empty number")]
    Empty,
    /// Input had no digits in the mantissa
    #[error("number '{0}' has no digits")]
    NoDigits(String),
    /// Unexpected character
    #[error("unexpected character '{ch}' at position {position} in number '{input}'")]
    UnexpectedChar {
        /// Full input text
        input: String,
        /// The offending character
        ch: char,
        /// Byte offset of the character
        position: usize,
    },
    /// Exponent missing digits or out of range
    #[error("invalid exponent in number '{0}'")]
    InvalidExponent(String),
}

/// Construction-time invariant violations for collection values
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// Element does not have the collection's element type
    #[error("element {index} has type {found}, expected {expected}")]
    ElementTypeMismatch {
        /// Position of the element in the input
        index: usize,
        /// Declared element type
        expected: String,
        /// Type of the offending element
        found: String,
    },

    /// Set input contains two deep-equal elements
    #[error("duplicate set element at index {index}: {element}")]
    DuplicateSetElement {
        /// Position of the second occurrence
        index: usize,
        /// Rendered element
        element: String,
    },

    /// Map entry value does not have the map's element type
    #[error("map entry {key:?} has type {found}, expected {expected}")]
    MapEntryTypeMismatch {
        /// Entry key
        key: String,
        /// Declared element type
        expected: String,
        /// Type of the offending value
        found: String,
    },

    /// Object value is missing a declared attribute
    #[error("object is missing attribute {0:?}")]
    MissingAttribute(String),

    /// Object value has an attribute its type does not declare
    #[error("object has undeclared attribute {0:?}")]
    UnexpectedAttribute(String),

    /// Object attribute value does not have its declared type
    #[error("object attribute {name:?} has type {found}, expected {expected}")]
    AttributeTypeMismatch {
        /// Attribute name
        name: String,
        /// Declared attribute type
        expected: String,
        /// Type of the offending value
        found: String,
    },

    /// Float64 payload is NaN or infinite
    #[error("float value {0} is not finite")]
    NonFiniteFloat(String),

    /// Tuple arity differs from its declared element types
    #[error("tuple has {actual} elements, its type declares {expected}")]
    TupleArity {
        /// Declared arity
        expected: usize,
        /// Supplied arity
        actual: usize,
    },
}

/// Error reading a wire value as a particular shape
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WireError {
    /// Payload has a different shape than requested
    #[error("expected {expected} payload, found {found}")]
    UnexpectedShape {
        /// Requested shape
        expected: &'static str,
        /// Actual shape
        found: &'static str,
    },

    /// Payload is null or unknown where a known payload was required
    #[error("cannot read {0} payload: value is not known")]
    NotKnown(&'static str),

    /// Value's payload disagrees with its own wire type
    #[error("payload does not conform to wire type {ty}: {reason}")]
    Nonconforming {
        /// Declared wire type
        ty: WireType,
        /// What was wrong
        reason: String,
    },

    /// Unknown values have no JSON encoding
    #[error("unknown values cannot be encoded as JSON")]
    UnknownInJson,

    /// JSON document does not match the requested wire type
    #[error("JSON value does not match wire type {ty}: {reason}")]
    Json {
        /// Requested wire type
        ty: WireType,
        /// What was wrong
        reason: String,
    },

    /// Number text failed to parse
    #[error(transparent)]
    Number(#[from] NumberParseError),
}

/// Error converting a wire value into a typed [`Value`](crate::Value)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    /// Wire value's type differs from the type it is being decoded as
    #[error("expected {expected} wire value, received {found}")]
    WireTypeMismatch {
        /// Wire type the static type requires
        expected: WireType,
        /// Wire type actually received
        found: WireType,
    },

    /// Wire payload could not be read
    #[error(transparent)]
    Wire(#[from] WireError),

    /// Decimal has no exact representation in the narrow target
    #[error("Value {value} cannot be represented as a {target}.")]
    PrecisionLoss {
        /// The decimal input, in canonical text
        value: String,
        /// Target description, e.g. "64-bit floating point"
        target: &'static str,
    },

    /// Collection invariant violated while assembling the value
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Custom type override produced a value of the wrong variant
    #[error("custom type {custom} produced a {found} value, expected {expected}")]
    CustomVariantMismatch {
        /// Custom type name
        custom: String,
        /// Base type name
        expected: String,
        /// Produced value's type name
        found: String,
    },

    /// Custom type override changed the on-wire payload
    #[error("custom type {0} altered the wire payload of its base type")]
    PayloadAltered(String),
}

impl ConversionError {
    /// Whether this error is a framework-level contract violation
    ///
    /// Fatal errors abort a decode. Non-fatal errors are reported as user
    /// diagnostics alongside a best-effort value.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ConversionError::PrecisionLoss { .. }
                | ConversionError::Value(ValueError::DuplicateSetElement { .. })
        )
    }
}
