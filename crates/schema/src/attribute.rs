//! Attributes
//!
//! An [`Attribute`] is a schema node written with assignment syntax
//! (`name = value`). It is either a leaf holding a [`Type`], or a nested
//! attribute pairing a [`NestingMode`] with a [`NestedObject`].
//!
//! ## Behavior flags
//!
//! | Flag | Meaning |
//! |------|---------|
//! | Required | the configuration must set a value |
//! | Optional | the configuration may set a value |
//! | Computed | the plugin may set the value |
//! | Sensitive | the value is redacted from diagnostics |
//!
//! Exactly one of Required, Optional or Computed-only must hold: Required
//! excludes both Optional and Computed; Optional and Computed may combine.
//! Flags are checked when the enclosing object is built.
//!
//! # Example
//!
//! ```
//! use plugframe_schema::Attribute;
//!
//! let region = Attribute::string()
//!     .optional()
//!     .computed()
//!     .description("Deployment region");
//! assert!(region.is_optional() && region.is_computed());
//! ```

use crate::error::SchemaError;
use crate::object::NestedObject;
use crate::plan::{DefaultValue, PlanModifier, Validator};
use plugframe_core::Type;
use std::sync::Arc;

/// How a nested node repeats its object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestingMode {
    /// Exactly one object
    Single,
    /// Ordered list of objects
    List,
    /// Unordered set of unique objects
    Set,
    /// String-keyed map of objects (attributes only)
    Map,
}

impl NestingMode {
    /// Type of a node repeating an object of type `object` in this mode
    pub fn wrap(self, object: Type) -> Type {
        match self {
            NestingMode::Single => object,
            NestingMode::List => Type::list(object),
            NestingMode::Set => Type::set(object),
            NestingMode::Map => Type::map(object),
        }
    }
}

/// Leaf type or nested object
#[derive(Debug, Clone)]
pub enum AttributeKind {
    /// Single typed value
    Leaf(Type),
    /// Object repeated per the nesting mode
    Nested {
        /// Repetition
        nesting: NestingMode,
        /// Children
        object: NestedObject,
    },
}

/// Schema attribute
#[derive(Debug, Clone)]
pub struct Attribute {
    kind: AttributeKind,
    required: bool,
    optional: bool,
    computed: bool,
    sensitive: bool,
    description: Option<String>,
    deprecation_message: Option<String>,
    validators: Vec<Arc<dyn Validator>>,
    plan_modifiers: Vec<Arc<dyn PlanModifier>>,
    default: Option<Arc<dyn DefaultValue>>,
}

impl Attribute {
    fn with_kind(kind: AttributeKind) -> Self {
        Attribute {
            kind,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            description: None,
            deprecation_message: None,
            validators: Vec::new(),
            plan_modifiers: Vec::new(),
            default: None,
        }
    }

    /// Leaf attribute of any type
    pub fn leaf(ty: Type) -> Self {
        Attribute::with_kind(AttributeKind::Leaf(ty))
    }

    /// Bool leaf
    pub fn bool() -> Self {
        Attribute::leaf(Type::Bool)
    }

    /// String leaf
    pub fn string() -> Self {
        Attribute::leaf(Type::String)
    }

    /// Int64 leaf
    pub fn int64() -> Self {
        Attribute::leaf(Type::Int64)
    }

    /// Float64 leaf
    pub fn float64() -> Self {
        Attribute::leaf(Type::Float64)
    }

    /// Arbitrary-precision number leaf
    pub fn number() -> Self {
        Attribute::leaf(Type::Number)
    }

    /// Dynamic leaf
    pub fn dynamic() -> Self {
        Attribute::leaf(Type::Dynamic)
    }

    /// List leaf of `element`
    pub fn list(element: Type) -> Self {
        Attribute::leaf(Type::list(element))
    }

    /// Set leaf of `element`
    pub fn set(element: Type) -> Self {
        Attribute::leaf(Type::set(element))
    }

    /// Map leaf of `element`
    pub fn map(element: Type) -> Self {
        Attribute::leaf(Type::map(element))
    }

    /// Nested attribute
    pub fn nested(nesting: NestingMode, object: NestedObject) -> Self {
        Attribute::with_kind(AttributeKind::Nested { nesting, object })
    }

    /// Mark Required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark Optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark Computed
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Mark Sensitive
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Set the description
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Mark deprecated with a message shown when the attribute is set
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecation_message = Some(message.into());
        self
    }

    /// Add a validator
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Add a plan modifier
    pub fn plan_modifier(mut self, modifier: impl PlanModifier + 'static) -> Self {
        self.plan_modifiers.push(Arc::new(modifier));
        self
    }

    /// Set the default value
    pub fn default_value(mut self, default: impl DefaultValue + 'static) -> Self {
        self.default = Some(Arc::new(default));
        self
    }

    /// Leaf type or nested object
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// Nested object, if this is a nested attribute
    pub fn nested_object(&self) -> Option<&NestedObject> {
        match &self.kind {
            AttributeKind::Nested { object, .. } => Some(object),
            AttributeKind::Leaf(_) => None,
        }
    }

    /// Derived type of this attribute's value
    pub fn ty(&self) -> Type {
        match &self.kind {
            AttributeKind::Leaf(ty) => ty.clone(),
            AttributeKind::Nested { nesting, object } => nesting.wrap(object.ty()),
        }
    }

    /// Check if Required
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check if Optional
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Check if Computed
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Check if Sensitive
    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    /// Description, if set
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Deprecation message, if deprecated
    pub fn deprecation_message(&self) -> Option<&str> {
        self.deprecation_message.as_deref()
    }

    /// Validators in declaration order
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// Plan modifiers in declaration order
    pub fn plan_modifiers(&self) -> &[Arc<dyn PlanModifier>] {
        &self.plan_modifiers
    }

    /// Default value, if set
    pub fn default(&self) -> Option<&Arc<dyn DefaultValue>> {
        self.default.as_ref()
    }

    /// Check behavior flags and nesting rules for the attribute named `name`
    pub(crate) fn check(&self, name: &str) -> Result<(), SchemaError> {
        let conflict = |first, second| SchemaError::ConflictingFlags {
            name: name.to_string(),
            first,
            second,
        };
        if self.required && self.optional {
            return Err(conflict("Required", "Optional"));
        }
        if self.required && self.computed {
            return Err(conflict("Required", "Computed"));
        }
        if !self.required && !self.optional && !self.computed {
            return Err(SchemaError::MissingFlags(name.to_string()));
        }
        if self.default.is_some() && !self.computed {
            return Err(SchemaError::DefaultRequiresComputed(name.to_string()));
        }
        if let AttributeKind::Nested { object, .. } = &self.kind {
            if object.attributes().is_empty() {
                return Err(SchemaError::EmptyNestedObject(name.to_string()));
            }
        }
        Ok(())
    }
}
