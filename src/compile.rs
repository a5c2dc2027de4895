//! Constraint compiler: walks a schema's properties and produces the
//! record type descriptor consumed by the generic constructor
//!
//! A nominal type is never synthesized at runtime; the descriptor plus
//! [`RecordType::instantiate`](crate::record) plays that role.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::constraints::{compile_predicate, Constraint, Functor, FunctorSet, Keyword};
use crate::schema::{is_object_schema, type_name_from_title, JsonType, PORCELAIN_KEYWORDS};

/// One declared property of a compiled record type
#[derive(Debug)]
pub struct FieldSpec {
    /// Property name as declared in the schema
    pub name: String,
    /// Declared `type`, when present and recognized
    pub declared_type: Option<JsonType>,
    /// Whether the property appears in the schema's `required` list
    pub required: bool,
    /// Declared `default`, when present
    pub default: Option<Value>,
    /// Constraints compiled from the property schema
    pub functors: FunctorSet,
}

/// A schema compiled into a validating record constructor.
///
/// Owned by the registry after registration; the functor sets are built
/// once here and never mutated.
#[derive(Debug)]
pub struct RecordType {
    name: String,
    fields: Vec<FieldSpec>,
}

impl RecordType {
    /// Type name derived from the schema title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptors in compilation order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a single field descriptor by property name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Compiles a schema into a [`RecordType`].
///
/// Returns `None` when the schema is missing `title`, `type`, or
/// `properties`, or when `type` is not `"object"`. This is an expected,
/// probe-able outcome, not an error.
pub fn compile(schema: &Value) -> Option<RecordType> {
    if !is_object_schema(schema) {
        debug!("schema rejected: requires title, properties, and type == \"object\"");
        return None;
    }
    let name = type_name_from_title(schema.get("title")?.as_str()?);

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let properties = schema.get("properties")?.as_object()?;
    let mut fields = Vec::with_capacity(properties.len());
    for (property, property_schema) in properties {
        // A non-object property schema declares nothing checkable
        let Some(keywords) = property_schema.as_object() else {
            continue;
        };
        let functors = compile_property(keywords);
        trace!(%property, constraints = functors.len(), "compiled property");
        fields.push(FieldSpec {
            name: property.clone(),
            declared_type: keywords
                .get("type")
                .and_then(Value::as_str)
                .and_then(JsonType::parse),
            required: required.contains(&property.as_str()),
            default: keywords.get("default").cloned(),
            functors,
        });
    }

    debug!(type_name = %name, fields = fields.len(), "schema compiled");
    Some(RecordType { name, fields })
}

/// Compiles every recognized keyword of one property (or combinator
/// branch) schema. Porcelain and unknown keys are skipped.
fn compile_property(keywords: &Map<String, Value>) -> FunctorSet {
    let mut set = FunctorSet::default();
    for (key, declared) in keywords {
        if PORCELAIN_KEYWORDS.contains(&key.as_str()) {
            continue;
        }
        let Some(keyword) = Keyword::parse(key) else {
            continue;
        };
        let functor = match keyword {
            Keyword::AnyOf | Keyword::AllOf | Keyword::OneOf => {
                let Some(branches) = declared.as_array() else {
                    continue;
                };
                Functor::Branches(
                    branches
                        .iter()
                        .filter_map(Value::as_object)
                        .map(compile_property)
                        .collect(),
                )
            }
            Keyword::Not => {
                let Some(negated) = declared.as_object() else {
                    continue;
                };
                Functor::Negated(compile_property(negated))
            }
            _ => match compile_predicate(keyword, declared) {
                Some(predicate) => Functor::Test(predicate),
                None => continue,
            },
        };
        set.push(Constraint { keyword, functor });
    }
    set
}
