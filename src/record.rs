//! Record instances: the generic constructor and the construction hook
//!
//! Construction populates fields from supplied values, declared defaults,
//! and zero values, then evaluates every compiled functor exactly once.
//! A record that returns from construction is frozen: the API exposes
//! accessors and exports only.

use serde_json::{Map, Value};
use tracing::trace;

use crate::compile::RecordType;
use crate::error::{Result, SchemaViolation};
use crate::evaluate::evaluate;
use crate::report::report;

/// An immutable, validated instance of a compiled record type
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Map<String, Value>,
}

impl RecordType {
    /// Builds a record from caller-supplied field values.
    ///
    /// Absent fields take the declared `default`, else the declared type's
    /// zero value, else JSON null. A required field with no supplied value
    /// fails with [`SchemaViolation::RequiredProperty`] before any functor
    /// runs. Supplied keys that are not declared properties are ignored.
    pub fn instantiate(&self, values: &Map<String, Value>) -> Result<Record> {
        let mut fields = Map::new();
        for spec in self.fields() {
            let value = match values.get(&spec.name) {
                Some(supplied) => supplied.clone(),
                None if spec.required => {
                    return Err(SchemaViolation::RequiredProperty(format!(
                        "property '{}' is required and has no default",
                        spec.name
                    )));
                }
                None => match (&spec.default, spec.declared_type) {
                    (Some(default), _) => default.clone(),
                    (None, Some(declared)) => declared.zero_value(),
                    (None, None) => Value::Null,
                },
            };
            fields.insert(spec.name.clone(), value);
        }

        report(&evaluate(self, &fields))?;
        trace!(type_name = %self.name(), "record validated");
        Ok(Record {
            type_name: self.name().to_string(),
            fields,
        })
    }

    /// Convenience wrapper over [`RecordType::instantiate`] taking a JSON
    /// object value.
    pub fn instantiate_from(&self, values: &Value) -> Result<Record> {
        let map = values.as_object().ok_or_else(|| {
            SchemaViolation::ValueType("instance values must be a JSON object".into())
        })?;
        self.instantiate(map)
    }
}

impl Record {
    /// Name of the record type this instance was validated against
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Reads one field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field names in field order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Exports the record as a property → value map.
    ///
    /// Lossless over declared properties: the result instantiates cleanly
    /// against the same record type.
    pub fn to_dict(&self) -> Map<String, Value> {
        self.fields.clone()
    }

    /// Exports the field values in field order
    pub fn to_list(&self) -> Vec<Value> {
        self.fields.values().cloned().collect()
    }

    /// Exports one CSV row of the field values, optionally preceded by a
    /// header row of property names.
    pub fn to_csv(&self, header: bool) -> String {
        let row = self
            .fields
            .values()
            .map(csv_cell)
            .collect::<Vec<_>>()
            .join(",");
        if header {
            let names = self
                .fields
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(",");
            format!("{names}\n{row}")
        } else {
            row
        }
    }
}

/// Strings render bare; everything else renders as JSON.
fn csv_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
