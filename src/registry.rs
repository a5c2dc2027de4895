//! Process-wide registry of compiled record types

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use serde_json::Value;
use tracing::debug;

use crate::compile::{compile, RecordType};

lazy_static! {
    static ref GLOBAL: SchemaRegistry = SchemaRegistry::new();
}

/// Registry mapping derived type names to compiled record types.
///
/// Written during registration and read thereafter. Registering two
/// schemas that derive the same type name is last-writer-wins.
pub struct SchemaRegistry {
    types: RwLock<HashMap<String, Arc<RecordType>>>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide default registry
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    /// Compiles and stores a schema under its derived type name.
    ///
    /// Returns `false` when the schema is malformed (missing `title`,
    /// `type`, or `properties`, or `type` not `"object"`). Malformed
    /// schemas are a probe-able condition, never an error.
    pub fn register(&self, schema: &Value) -> bool {
        match compile(schema) {
            Some(record_type) => {
                let name = record_type.name().to_string();
                debug!(type_name = %name, "registered record type");
                self.types
                    .write()
                    .expect("registry lock poisoned")
                    .insert(name, Arc::new(record_type));
                true
            }
            None => false,
        }
    }

    /// Retrieves a compiled record type by its derived name
    pub fn get(&self, name: &str) -> Option<Arc<RecordType>> {
        self.types
            .read()
            .expect("registry lock poisoned")
            .get(name)
            .cloned()
    }

    /// Whether a type of this name has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.types
            .read()
            .expect("registry lock poisoned")
            .contains_key(name)
    }

    /// Number of registered record types
    pub fn len(&self) -> usize {
        self.types.read().expect("registry lock poisoned").len()
    }

    /// Whether the registry holds no types
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
