//! Schema and type layer integration tests
//!
//! One module per behavioral guarantee of the decode and validation
//! pipeline, exercised through the public `plugframe` facade.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod extension_transparency;
mod json_bridge;
mod narrowing_law;
mod pass_agreement;
mod round_trip;
mod schema_flags;
mod set_uniqueness;
mod validation_completeness;
