//! Attribute hooks
//!
//! Schema nodes carry three kinds of plugin-supplied behavior. The schema
//! layer only stores them and defines when they run; what they do is up to
//! the plugin.
//!
//! | Hook | Runs | Effect |
//! |------|------|--------|
//! | [`Validator`] | validation pass, on known values | appends diagnostics |
//! | [`DefaultValue`] | planning, when config is null | supplies a value |
//! | [`PlanModifier`] | planning, after defaults | rewrites the planned value |
//!
//! All hooks are shared across concurrent requests and must be `Send + Sync`.

use crate::attribute::Attribute;
use plugframe_core::{AttributePath, Diagnostics, Value};
use std::fmt;

// =============================================================================
// Validators
// =============================================================================

/// Domain-specific validation of a typed attribute value
pub trait Validator: fmt::Debug + Send + Sync {
    /// Human-readable description of the constraint
    fn description(&self) -> String;

    /// Check a known, non-null value and append any problems
    fn validate(&self, value: &Value, path: &AttributePath, diags: &mut Diagnostics);
}

/// String length (in characters) or collection size within bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBetween {
    /// Inclusive minimum
    pub min: usize,
    /// Inclusive maximum
    pub max: usize,
}

impl LengthBetween {
    /// Bounds `min..=max`
    pub fn new(min: usize, max: usize) -> Self {
        LengthBetween { min, max }
    }
}

impl Validator for LengthBetween {
    fn description(&self) -> String {
        format!("length must be between {} and {}", self.min, self.max)
    }

    fn validate(&self, value: &Value, path: &AttributePath, diags: &mut Diagnostics) {
        let len = if let Some(s) = value.as_str() {
            s.chars().count()
        } else if let Some(list) = value.as_list() {
            list.elements().map_or(0, <[Value]>::len)
        } else if let Some(set) = value.as_set() {
            set.elements().map_or(0, <[Value]>::len)
        } else if let Some(map) = value.as_map() {
            map.entries().map_or(0, |e| e.len())
        } else {
            return;
        };
        if len < self.min || len > self.max {
            diags.add_attribute_error(
                path,
                "Invalid Attribute Value Length",
                format!(
                    "Attribute {} {}, got: {}",
                    path,
                    self.description(),
                    len
                ),
            );
        }
    }
}

/// String must be one of a fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    allowed: Vec<String>,
}

impl OneOf {
    /// Allow exactly these strings
    pub fn new<S: Into<String>>(allowed: impl IntoIterator<Item = S>) -> Self {
        OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for OneOf {
    fn description(&self) -> String {
        let quoted: Vec<String> = self.allowed.iter().map(|s| format!("{:?}", s)).collect();
        format!("value must be one of: [{}]", quoted.join(" "))
    }

    fn validate(&self, value: &Value, path: &AttributePath, diags: &mut Diagnostics) {
        if let Some(s) = value.as_str() {
            if !self.allowed.iter().any(|a| a == s) {
                diags.add_attribute_error(
                    path,
                    "Invalid Attribute Value Match",
                    format!("Attribute {} {}, got: {:?}", path, self.description(), s),
                );
            }
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

/// Value used when the configuration leaves a Computed attribute null
pub trait DefaultValue: fmt::Debug + Send + Sync {
    /// Human-readable description of the default
    fn description(&self) -> String;

    /// The default for the attribute at `path`
    fn default_value(&self, path: &AttributePath) -> Value;
}

/// A fixed default value
#[derive(Debug, Clone)]
pub struct StaticDefault(Value);

impl StaticDefault {
    /// Always default to `value`
    pub fn new(value: impl Into<Value>) -> Self {
        StaticDefault(value.into())
    }
}

impl DefaultValue for StaticDefault {
    fn description(&self) -> String {
        format!("value defaults to {}", self.0)
    }

    fn default_value(&self, _: &AttributePath) -> Value {
        self.0.clone()
    }
}

/// Resolve the value an attribute plans with before plan modifiers run
///
/// A null config value is replaced by the attribute's default, if any. A
/// default whose type differs from the attribute's type is a plugin bug: it
/// is reported and the config value is kept.
pub fn resolve_default(
    attr: &Attribute,
    path: &AttributePath,
    config: &Value,
    diags: &mut Diagnostics,
) -> Value {
    let Some(default) = attr.default() else {
        return config.clone();
    };
    if !config.is_null() {
        return config.clone();
    }
    let value = default.default_value(path);
    let expected = attr.ty();
    if !value.ty().equal(&expected) {
        diags.add_attribute_error(
            path,
            "Default Value Type Mismatch",
            plugframe_core::provider_error_detail(format!(
                "Expected {} default value, received {} value",
                expected,
                value.ty()
            )),
        );
        return config.clone();
    }
    value
}

// =============================================================================
// Plan modifiers
// =============================================================================

/// Inputs to a plan modifier
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    /// Attribute being planned
    pub path: &'a AttributePath,
    /// Value from configuration
    pub config: &'a Value,
    /// Value from prior state (null when creating)
    pub state: &'a Value,
    /// Planned value so far
    pub plan: &'a Value,
}

/// Rewrites an attribute's planned value
pub trait PlanModifier: fmt::Debug + Send + Sync {
    /// Human-readable description of the modification
    fn description(&self) -> String;

    /// Return the new planned value
    fn modify_plan(&self, request: &PlanRequest<'_>, diags: &mut Diagnostics) -> Value;
}

/// Keep the prior state value instead of planning an unknown
///
/// For computed attributes that never change after creation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseStateForUnknown;

impl PlanModifier for UseStateForUnknown {
    fn description(&self) -> String {
        "Once set, the value of this attribute in state will not change.".to_string()
    }

    fn modify_plan(&self, request: &PlanRequest<'_>, _: &mut Diagnostics) -> Value {
        // An unknown config value means the user is changing it
        if request.state.is_null() || !request.plan.is_unknown() || request.config.is_unknown() {
            request.plan.clone()
        } else {
            request.state.clone()
        }
    }
}

/// Run an attribute's plan modifiers in declaration order
///
/// Each modifier sees the plan produced by the one before it. Modifiers
/// whose output has the wrong type are reported and skipped.
pub fn apply_plan_modifiers(
    attr: &Attribute,
    path: &AttributePath,
    config: &Value,
    state: &Value,
    plan: Value,
    diags: &mut Diagnostics,
) -> Value {
    let expected = attr.ty();
    let mut plan = plan;
    for modifier in attr.plan_modifiers() {
        let request = PlanRequest {
            path,
            config,
            state,
            plan: &plan,
        };
        let next = modifier.modify_plan(&request, diags);
        if next.ty().equal(&expected) {
            plan = next;
        } else {
            diags.add_attribute_error(
                path,
                "Plan Modifier Type Mismatch",
                plugframe_core::provider_error_detail(format!(
                    "Plan modifier {:?} returned a {} value, expected {}",
                    modifier.description(),
                    next.ty(),
                    expected
                )),
            );
        }
    }
    plan
}
