//! Violation types raised when an instance fails its schema

use thiserror::Error;

/// Typed constraint violations for record construction.
///
/// Instance violations are returned synchronously from construction; a
/// record either fully satisfies its schema or does not exist. Malformed
/// *schemas* never surface here — registration reports them with a plain
/// `false` so callers can probe a schema without error plumbing.
#[derive(Error, Debug)]
pub enum SchemaViolation {
    /// Wrong runtime type, or enum-membership failure
    #[error("value type violation: {0}")]
    ValueType(String),

    /// Numeric bound or multiple-of failure
    #[error("range constraint violation: {0}")]
    RangeConstraint(String),

    /// String or sequence length bound failure
    #[error("length constraint violation: {0}")]
    LengthConstraint(String),

    /// Named format validator failure, or an unrecognized format name
    #[error("string format violation: {0}")]
    StringFormat(String),

    /// A combinator (`anyOf`/`allOf`/`oneOf`/`not`) failure
    #[error("subschema failure: {0}")]
    SubSchemaFailure(String),

    /// Required field absent with no declared default
    #[error("required property violation: {0}")]
    RequiredProperty(String),

    /// An error handler or renderer hook failed
    #[error("hook error: {0}")]
    Hook(#[from] anyhow::Error),
}

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, SchemaViolation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages_name_the_category() {
        let v = SchemaViolation::RangeConstraint("rating above maximum".into());
        assert!(v.to_string().contains("range constraint"));

        let v = SchemaViolation::RequiredProperty("brand_name".into());
        assert!(v.to_string().contains("required property"));
    }

    #[test]
    fn test_hook_errors_wrap_anyhow() {
        let v: SchemaViolation = anyhow::anyhow!("renderer exploded").into();
        assert!(matches!(v, SchemaViolation::Hook(_)));
    }
}
