//! Model factory: registration bundled with post-validation hooks
//!
//! The error handler and renderer are single-method capabilities applied
//! to every freshly validated record, in that order. Capability
//! satisfaction is checked by the compiler: an incomplete implementation
//! of [`ErrorHandler`] or [`Renderer`] cannot be constructed at all,
//! which is the static rendition of a registration-time probe.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Result, SchemaViolation};
use crate::record::Record;
use crate::registry::SchemaRegistry;

/// Post-validation hook that may wrap or transform a record, or turn it
/// into an error of its own.
pub trait ErrorHandler: Send + Sync {
    /// Applies the hook to a validated record
    fn apply(&self, record: Record) -> anyhow::Result<Record>;
}

/// Presentation hook applied after error handling
pub trait Renderer: Send + Sync {
    /// Applies the hook to a validated record
    fn apply(&self, record: Record) -> anyhow::Result<Record>;
}

/// Pass-through error handler
#[derive(Debug, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn apply(&self, record: Record) -> anyhow::Result<Record> {
        Ok(record)
    }
}

/// Pass-through renderer
#[derive(Debug, Default)]
pub struct DefaultRenderer;

impl Renderer for DefaultRenderer {
    fn apply(&self, record: Record) -> anyhow::Result<Record> {
        Ok(record)
    }
}

/// Bundles a registry with the hooks applied at construction time
pub struct ModelFactory {
    registry: Arc<SchemaRegistry>,
    error_handler: Arc<dyn ErrorHandler>,
    renderer: Arc<dyn Renderer>,
}

impl ModelFactory {
    /// Creates a factory over its own private registry with pass-through
    /// hooks
    pub fn new() -> Self {
        Self::with_registry(Arc::new(SchemaRegistry::new()))
    }

    /// Creates a factory over an existing registry
    pub fn with_registry(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            error_handler: Arc::new(DefaultErrorHandler),
            renderer: Arc::new(DefaultRenderer),
        }
    }

    /// Replaces the error handler hook
    #[must_use]
    pub fn error_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = handler;
        self
    }

    /// Replaces the renderer hook
    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Registers one schema; see [`SchemaRegistry::register`]
    pub fn register(&self, schema: &Value) -> bool {
        self.registry.register(schema)
    }

    /// Registers a batch of schemas, returning how many were accepted
    pub fn register_all<'a>(&self, schemas: impl IntoIterator<Item = &'a Value>) -> usize {
        schemas
            .into_iter()
            .filter(|schema| self.register(schema))
            .count()
    }

    /// The registry backing this factory
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Constructs a record of a registered type, then applies the error
    /// handler and renderer hooks.
    pub fn construct(&self, type_name: &str, values: &Map<String, Value>) -> Result<Record> {
        let record_type = self.registry.get(type_name).ok_or_else(|| {
            SchemaViolation::ValueType(format!("no registered record type named '{type_name}'"))
        })?;
        let record = record_type.instantiate(values)?;
        let record = self.error_handler.apply(record)?;
        let record = self.renderer.apply(record)?;
        Ok(record)
    }

    /// Convenience wrapper over [`ModelFactory::construct`] taking a JSON
    /// object value.
    pub fn construct_from(&self, type_name: &str, values: &Value) -> Result<Record> {
        let map = values.as_object().ok_or_else(|| {
            SchemaViolation::ValueType("instance values must be a JSON object".into())
        })?;
        self.construct(type_name, map)
    }
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::new()
    }
}
