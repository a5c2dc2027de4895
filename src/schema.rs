//! Raw schema handling: top-level shape checks, type-name derivation,
//! and the JSON type catalog

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys that carry data or documentation rather than constraints.
///
/// These are never compiled into predicates.
pub const PORCELAIN_KEYWORDS: &[&str] = &["value", "default", "description"];

/// Declared JSON types recognized by the `type` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// UTF-8 string
    String,
    /// Whole number (i64/u64)
    Integer,
    /// Any JSON number, integral or floating
    Number,
    /// Boolean
    Boolean,
    /// JSON null
    Null,
    /// Sequence of values
    Array,
}

impl JsonType {
    /// Parses a declared `type` name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Array => "array",
        }
    }

    /// Whether a runtime value is of this type.
    ///
    /// `number` accepts integral values; `integer` does not accept floats.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
            Self::Array => value.is_array(),
        }
    }

    /// Zero value used when a property is omitted with no declared default.
    pub fn zero_value(self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Integer => Value::from(0),
            Self::Number => Value::from(0.0),
            Self::Boolean => Value::Bool(false),
            Self::Null => Value::Null,
            Self::Array => Value::Array(Vec::new()),
        }
    }
}

/// Derives the record type name from a schema title by dropping `-`/`_`
/// separators and title-casing each segment: `"my-schema"` → `"MySchema"`.
pub fn type_name_from_title(title: &str) -> String {
    title
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Checks the top-level shape required of every registered schema:
/// `title` (string), `type` equal to `"object"`, and a `properties` object.
pub fn is_object_schema(schema: &Value) -> bool {
    let Some(object) = schema.as_object() else {
        return false;
    };
    object.get("title").is_some_and(Value::is_string)
        && object.get("type").and_then(Value::as_str) == Some("object")
        && object.get("properties").is_some_and(Value::is_object)
}
