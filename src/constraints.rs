//! Predicate library: each schema keyword compiles into a bound closure
//!
//! Simple keywords (`minimum`, `maxLength`, ...) become unary predicates
//! over the runtime value. Combinator keywords (`anyOf`/`allOf`/`oneOf`/
//! `not`) instead carry recursively compiled branch sets; their boolean
//! algebra lives in [`crate::evaluate`].

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::schema::JsonType;

lazy_static! {
    /// RFC-5322-lite email shape: lowercase local part (no `@`), lowercase
    /// domain of dot-separated labels, TLD component ends alphanumeric.
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)+$"
    )
    .expect("email pattern is valid");
}

/// A compiled unary predicate over a runtime value
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Schema keywords recognized by the predicate library.
///
/// Keys outside this catalog (other than porcelain keys) are ignored by
/// compilation, so newer schema vocabulary does not break registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `type`
    Type,
    /// `minimum` (inclusive)
    Minimum,
    /// `maximum` (inclusive)
    Maximum,
    /// `exclusiveMinimum` (strict)
    ExclusiveMinimum,
    /// `exclusiveMaximum` (strict)
    ExclusiveMaximum,
    /// `multipleOf`
    MultipleOf,
    /// `minLength`
    MinLength,
    /// `maxLength`
    MaxLength,
    /// `enum`
    Enum,
    /// `format`
    Format,
    /// `anyOf`
    AnyOf,
    /// `allOf`
    AllOf,
    /// `oneOf`
    OneOf,
    /// `not`
    Not,
}

impl Keyword {
    /// Parses a schema key. Unrecognized keys yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "type" => Some(Self::Type),
            "minimum" => Some(Self::Minimum),
            "maximum" => Some(Self::Maximum),
            "exclusiveMinimum" => Some(Self::ExclusiveMinimum),
            "exclusiveMaximum" => Some(Self::ExclusiveMaximum),
            "multipleOf" => Some(Self::MultipleOf),
            "minLength" => Some(Self::MinLength),
            "maxLength" => Some(Self::MaxLength),
            "enum" => Some(Self::Enum),
            "format" => Some(Self::Format),
            "anyOf" => Some(Self::AnyOf),
            "allOf" => Some(Self::AllOf),
            "oneOf" => Some(Self::OneOf),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    /// Returns the schema spelling of the keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::MultipleOf => "multipleOf",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Enum => "enum",
            Self::Format => "format",
            Self::AnyOf => "anyOf",
            Self::AllOf => "allOf",
            Self::OneOf => "oneOf",
            Self::Not => "not",
        }
    }

    /// Whether this keyword holds sub-schemas rather than a scalar bound
    pub fn is_combinator(self) -> bool {
        matches!(self, Self::AnyOf | Self::AllOf | Self::OneOf | Self::Not)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The compiled form of one keyword
pub enum Functor {
    /// Simple keyword: a bound predicate over the field value
    Test(Predicate),
    /// `anyOf`/`allOf`/`oneOf`: each branch compiled to its own set
    Branches(Vec<FunctorSet>),
    /// `not`: the negated sub-schema's compiled set
    Negated(FunctorSet),
}

/// One compiled constraint: the keyword that produced it plus its functor
pub struct Constraint {
    /// Keyword the functor was compiled from
    pub keyword: Keyword,
    /// The bound predicate or branch sets
    pub functor: Functor,
}

/// The ordered constraints compiled for a single property.
///
/// Built once at registration and never mutated afterward.
#[derive(Default)]
pub struct FunctorSet {
    /// Constraints in compilation order
    pub constraints: Vec<Constraint>,
}

impl FunctorSet {
    /// Whether no constraints were compiled for the property
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Number of compiled constraints
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Appends a compiled constraint
    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }
}

impl fmt::Debug for FunctorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.constraints.iter().map(|c| c.keyword))
            .finish()
    }
}

/// Builds the predicate for a simple keyword and its declared value.
///
/// Returns `None` for combinator keywords (their branches are compiled by
/// the schema walker) and for declared values of the wrong shape, which
/// are skipped the same way unknown keywords are. Exception: a zero
/// `multipleOf` divisor fails closed with a predicate rejecting every
/// value, as does an unrecognized `format` name.
pub fn compile_predicate(keyword: Keyword, declared: &Value) -> Option<Predicate> {
    match keyword {
        Keyword::Type => {
            let ty = JsonType::parse(declared.as_str()?)?;
            Some(Box::new(move |v| ty.matches(v)))
        }
        Keyword::Minimum => numeric_bound(declared, |v, b| v >= b),
        Keyword::Maximum => numeric_bound(declared, |v, b| v <= b),
        Keyword::ExclusiveMinimum => numeric_bound(declared, |v, b| v > b),
        Keyword::ExclusiveMaximum => numeric_bound(declared, |v, b| v < b),
        Keyword::MultipleOf => {
            let divisor = declared.as_f64()?;
            if divisor == 0.0 {
                return Some(Box::new(|_| false));
            }
            Some(Box::new(move |v| {
                v.as_f64().is_some_and(|n| is_multiple_of(n, divisor))
            }))
        }
        Keyword::MinLength => length_bound(declared, |len, b| len >= b),
        Keyword::MaxLength => length_bound(declared, |len, b| len <= b),
        Keyword::Enum => {
            let members = declared.as_array()?.clone();
            Some(Box::new(move |v| members.contains(v)))
        }
        Keyword::Format => match declared.as_str()? {
            "email" => Some(Box::new(|v| {
                v.as_str().is_some_and(|s| EMAIL_RE.is_match(s))
            })),
            // Unrecognized format names fail closed
            _ => Some(Box::new(|_| false)),
        },
        Keyword::AnyOf | Keyword::AllOf | Keyword::OneOf | Keyword::Not => None,
    }
}

fn numeric_bound(declared: &Value, cmp: fn(f64, f64) -> bool) -> Option<Predicate> {
    let bound = declared.as_f64()?;
    Some(Box::new(move |v| {
        v.as_f64().is_some_and(|n| cmp(n, bound))
    }))
}

fn length_bound(declared: &Value, cmp: fn(usize, usize) -> bool) -> Option<Predicate> {
    let bound = usize::try_from(declared.as_u64()?).ok()?;
    Some(Box::new(move |v| {
        value_len(v).is_some_and(|len| cmp(len, bound))
    }))
}

/// Length of a string (in chars) or a sequence. Other values have none.
fn value_len(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn is_multiple_of(value: f64, divisor: f64) -> bool {
    let quotient = value / divisor;
    (quotient - quotient.round()).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn predicate(keyword: Keyword, declared: Value) -> Predicate {
        compile_predicate(keyword, &declared).expect("predicate compiles")
    }

    #[test]
    fn test_type_predicate() {
        let is_number = predicate(Keyword::Type, json!("number"));
        assert!(is_number(&json!(10)));
        assert!(is_number(&json!(1.5)));
        assert!(!is_number(&json!("10")));

        let is_integer = predicate(Keyword::Type, json!("integer"));
        assert!(is_integer(&json!(10)));
        assert!(!is_integer(&json!(10.5)));
    }

    #[test]
    fn test_inclusive_bounds_accept_boundary() {
        let min = predicate(Keyword::Minimum, json!(0));
        let max = predicate(Keyword::Maximum, json!(5));
        assert!(min(&json!(0)));
        assert!(max(&json!(5)));
        assert!(!min(&json!(-1)));
        assert!(!max(&json!(6)));
        assert!(max(&json!(3)));
    }

    #[test]
    fn test_exclusive_bounds_reject_boundary() {
        let min = predicate(Keyword::ExclusiveMinimum, json!(0));
        let max = predicate(Keyword::ExclusiveMaximum, json!(5));
        assert!(!min(&json!(0)));
        assert!(!max(&json!(5)));
        assert!(min(&json!(1)));
        assert!(max(&json!(4.9)));
    }

    #[test]
    fn test_non_numeric_value_fails_numeric_bound() {
        let max = predicate(Keyword::Maximum, json!(5));
        assert!(!max(&json!("five")));
        assert!(!max(&Value::Null));
    }

    #[test]
    fn test_multiple_of() {
        let by_seven = predicate(Keyword::MultipleOf, json!(7));
        assert!(by_seven(&json!(14)));
        assert!(by_seven(&json!(0)));
        assert!(by_seven(&json!(-21)));
        assert!(!by_seven(&json!(20)));

        let fractional = predicate(Keyword::MultipleOf, json!(0.5));
        assert!(fractional(&json!(1.5)));
        assert!(!fractional(&json!(1.3)));
    }

    #[test]
    fn test_multiple_of_zero_fails_closed() {
        let broken = predicate(Keyword::MultipleOf, json!(0));
        assert!(!broken(&json!(0)));
        assert!(!broken(&json!(7)));
    }

    #[test]
    fn test_length_bounds_at_boundary() {
        let min = predicate(Keyword::MinLength, json!(2));
        let max = predicate(Keyword::MaxLength, json!(5));
        assert!(min(&json!("ab")));
        assert!(!min(&json!("a")));
        assert!(max(&json!("abcde")));
        assert!(!max(&json!("abcdefgh")));
    }

    #[test]
    fn test_length_counts_chars_and_elements() {
        let max = predicate(Keyword::MaxLength, json!(3));
        // three chars, more than three bytes
        assert!(max(&json!("äöü")));
        assert!(max(&json!([1, 2, 3])));
        assert!(!max(&json!([1, 2, 3, 4])));
        // lengths are undefined for numbers
        assert!(!max(&json!(12)));
    }

    #[test]
    fn test_enum_membership() {
        let handiness = predicate(Keyword::Enum, json!(["left", "right", "all", "none"]));
        assert!(handiness(&json!("left")));
        assert!(!handiness(&json!("welp")));
    }

    #[test]
    fn test_email_format() {
        let email = predicate(Keyword::Format, json!("email"));
        assert!(email(&json!("alice@example.com")));
        assert!(email(&json!("a.b-c_d@mail.co.uk")));
        assert!(!email(&json!("Alice@example.com"))); // uppercase local part
        assert!(!email(&json!("alice@localhost"))); // dotless domain
        assert!(!email(&json!("alice.example.com"))); // no @
        assert!(!email(&json!("alice@example.c-"))); // TLD not alphanumeric
        assert!(!email(&json!(42)));
    }

    #[test]
    fn test_unknown_format_fails_closed() {
        let phone = predicate(Keyword::Format, json!("phone"));
        assert!(!phone(&json!("+1-555-0100")));
        assert!(!phone(&json!("anything")));
    }

    #[test]
    fn test_combinators_have_no_scalar_predicate() {
        assert!(compile_predicate(Keyword::AnyOf, &json!([])).is_none());
        assert!(compile_predicate(Keyword::Not, &json!({})).is_none());
    }

    #[test]
    fn test_keyword_round_trip() {
        for key in [
            "type",
            "minimum",
            "maximum",
            "exclusiveMinimum",
            "exclusiveMaximum",
            "multipleOf",
            "minLength",
            "maxLength",
            "enum",
            "format",
            "anyOf",
            "allOf",
            "oneOf",
            "not",
        ] {
            let keyword = Keyword::parse(key).expect("recognized keyword");
            assert_eq!(keyword.as_str(), key);
        }
        assert_eq!(Keyword::parse("patternProperties"), None);
    }
}
