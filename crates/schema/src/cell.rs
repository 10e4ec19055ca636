//! Publish-once schema holder
//!
//! Plugins build their schemas lazily on the first request and then serve
//! every later request from the same immutable tree. [`SchemaCell`] holds
//! that tree: the first successful build wins, concurrent initializers
//! block until it is published, and readers never see a partial schema.

use crate::error::SchemaError;
use crate::schema::Schema;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Lazily built, shared [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaCell {
    inner: OnceCell<Arc<Schema>>,
}

impl SchemaCell {
    /// Create an empty cell (usable in statics)
    pub const fn new() -> Self {
        SchemaCell {
            inner: OnceCell::new(),
        }
    }

    /// The published schema, if any
    pub fn get(&self) -> Option<Arc<Schema>> {
        self.inner.get().cloned()
    }

    /// Return the published schema, building it first if needed
    ///
    /// A failed build publishes nothing; the next caller tries again.
    pub fn get_or_try_init<F>(&self, build: F) -> Result<Arc<Schema>, SchemaError>
    where
        F: FnOnce() -> Result<Schema, SchemaError>,
    {
        self.inner
            .get_or_try_init(|| {
                let schema = build()?;
                debug!(target: "plugframe::schema", version = schema.version(), "Schema published");
                Ok(Arc::new(schema))
            })
            .cloned()
    }

    /// Publish `schema`; returns it back if the cell was already set
    pub fn set(&self, schema: Schema) -> Result<(), Schema> {
        self.inner
            .set(Arc::new(schema))
            .map_err(|rejected| Arc::try_unwrap(rejected).unwrap_or_else(|arc| (*arc).clone()))
    }
}
