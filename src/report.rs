//! Violation reporter: fixed-precedence scan over evaluator outcomes
//!
//! Combinator failures outrank type failures, which outrank range and
//! length failures. Only the first failing category is reported even
//! though all outcomes were already computed.

use crate::constraints::Keyword;
use crate::error::{Result, SchemaViolation};
use crate::evaluate::Outcome;

/// Returns the first violation found in precedence order, or `Ok(())`
/// when every outcome passed.
pub fn report(outcomes: &[Outcome]) -> Result<()> {
    if let Some(o) = first_failure(outcomes, &[Keyword::Not]) {
        return Err(SchemaViolation::SubSchemaFailure(format!(
            "property '{}' matches its negated subschema",
            o.property
        )));
    }
    if let Some(o) = first_failure(outcomes, &[Keyword::OneOf]) {
        return Err(SchemaViolation::SubSchemaFailure(format!(
            "property '{}' must match exactly one subschema",
            o.property
        )));
    }
    if let Some(o) = first_failure(outcomes, &[Keyword::AnyOf]) {
        return Err(SchemaViolation::SubSchemaFailure(format!(
            "property '{}' matches none of its subschemas",
            o.property
        )));
    }
    if let Some(o) = first_failure(outcomes, &[Keyword::AllOf]) {
        return Err(SchemaViolation::SubSchemaFailure(format!(
            "property '{}' fails at least one subschema",
            o.property
        )));
    }
    if let Some(o) = first_failure(outcomes, &[Keyword::Type]) {
        return Err(SchemaViolation::ValueType(format!(
            "property '{}' has an incorrect runtime type",
            o.property
        )));
    }
    if let Some(o) = first_failure(outcomes, &[Keyword::Enum]) {
        return Err(SchemaViolation::ValueType(format!(
            "property '{}' must use a declared enum value",
            o.property
        )));
    }
    if let Some(o) = first_failure(outcomes, &[Keyword::Format]) {
        return Err(SchemaViolation::StringFormat(format!(
            "property '{}' does not match its declared format",
            o.property
        )));
    }
    if let Some(o) = first_failure(
        outcomes,
        &[
            Keyword::Maximum,
            Keyword::ExclusiveMaximum,
            Keyword::ExclusiveMinimum,
            Keyword::Minimum,
            Keyword::MultipleOf,
        ],
    ) {
        return Err(SchemaViolation::RangeConstraint(format!(
            "property '{}' violates its {} constraint",
            o.property, o.keyword
        )));
    }
    if let Some(o) = first_failure(outcomes, &[Keyword::MaxLength, Keyword::MinLength]) {
        return Err(SchemaViolation::LengthConstraint(format!(
            "property '{}' violates its {} constraint",
            o.property, o.keyword
        )));
    }
    Ok(())
}

/// First failing outcome, scanning keywords in the given order.
fn first_failure<'a>(outcomes: &'a [Outcome], keywords: &[Keyword]) -> Option<&'a Outcome> {
    keywords
        .iter()
        .find_map(|kw| outcomes.iter().find(|o| !o.passed && o.keyword == *kw))
}
