//! Constraint evaluator: applies each property's compiled functors to the
//! populated field values and aggregates combinator algebra

use serde_json::{Map, Value};

use crate::compile::RecordType;
use crate::constraints::{Functor, FunctorSet, Keyword};

/// The pass/fail result of one compiled keyword against one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Property the constraint was compiled for
    pub property: String,
    /// Keyword that produced the constraint
    pub keyword: Keyword,
    /// Whether the field value satisfied the constraint
    pub passed: bool,
}

/// Evaluates every compiled functor against the matching field value,
/// yielding one outcome per keyword per property.
///
/// All outcomes are computed in a single pass; fail-fast selection is the
/// reporter's job, not the evaluator's.
pub fn evaluate(record_type: &RecordType, fields: &Map<String, Value>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for spec in record_type.fields() {
        if spec.functors.is_empty() {
            continue;
        }
        let value = fields.get(&spec.name).unwrap_or(&Value::Null);
        for constraint in &spec.functors.constraints {
            outcomes.push(Outcome {
                property: spec.name.clone(),
                keyword: constraint.keyword,
                passed: apply(constraint.keyword, &constraint.functor, value),
            });
        }
    }
    outcomes
}

fn apply(keyword: Keyword, functor: &Functor, value: &Value) -> bool {
    match functor {
        Functor::Test(predicate) => predicate(value),
        Functor::Negated(negated) => !passes_all(negated, value),
        Functor::Branches(branches) => {
            let passing = branches.iter().filter(|b| passes_all(b, value)).count();
            match keyword {
                Keyword::AnyOf => passing >= 1,
                Keyword::AllOf => passing == branches.len(),
                // Exactly one of N; a chained XOR would accept any odd
                // number of passing branches once N > 2.
                Keyword::OneOf => passing == 1,
                _ => false,
            }
        }
    }
}

/// A branch passes only when every one of its compiled constraints passes.
fn passes_all(set: &FunctorSet, value: &Value) -> bool {
    set.constraints
        .iter()
        .all(|c| apply(c.keyword, &c.functor, value))
}
