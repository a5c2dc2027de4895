//! Schema-driven record types
//!
//! This crate compiles a JSON-Schema-like description of an object type
//! into a validating record constructor. The schema is walked once, at
//! registration time, and every recognized constraint keyword is bound
//! into a predicate closure (a "functor"). Constructing an instance
//! evaluates all of a record's functors against the populated field values
//! and either returns a frozen, immutable [`Record`] or fails with a typed
//! [`SchemaViolation`].
//!
//! ```
//! use schema_models::prelude::*;
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::new();
//! assert!(registry.register(&json!({
//!     "title": "product-rating",
//!     "type": "object",
//!     "properties": {
//!         "rating": { "type": "number", "minimum": 0, "maximum": 5 }
//!     }
//! })));
//!
//! let rating = registry.get("ProductRating").unwrap();
//! assert!(rating.instantiate_from(&json!({ "rating": 5 })).is_ok());
//! assert!(rating.instantiate_from(&json!({ "rating": 6 })).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod compile;
pub mod constraints;
pub mod error;
pub mod evaluate;
pub mod factory;
pub mod record;
pub mod registry;
pub mod report;
pub mod schema;

// Re-export the core types and operations
pub use compile::{compile, FieldSpec, RecordType};
pub use constraints::{compile_predicate, Constraint, Functor, FunctorSet, Keyword, Predicate};
pub use error::{Result, SchemaViolation};
pub use evaluate::{evaluate, Outcome};
pub use factory::{DefaultErrorHandler, DefaultRenderer, ErrorHandler, ModelFactory, Renderer};
pub use record::Record;
pub use registry::SchemaRegistry;
pub use report::report;
pub use schema::JsonType;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ModelFactory, Record, RecordType, Result, SchemaRegistry, SchemaViolation,
    };
}
