//! Compiled, schema-checked predicates.
//!
//! A [`Predicate`] is built only by the filter compiler and the query shaper, so
//! every comparison it holds has already been validated against an entity schema.
//! Evaluation is pure and deterministic over a JSON row.

use super::criteria::OperatorKind;
use super::value::TypedValue;
use crate::schema::SemanticType;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Single(TypedValue),
    /// Candidate set for the `In` operator
    List(Vec<TypedValue>),
}

/// One validated `property <op> operand` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    property: String,
    semantic_type: SemanticType,
    case_exact: bool,
    operator: OperatorKind,
    operand: Operand,
}

impl Comparison {
    pub(crate) fn new(
        property: impl Into<String>,
        semantic_type: SemanticType,
        case_exact: bool,
        operator: OperatorKind,
        operand: Operand,
    ) -> Self {
        Self {
            property: property.into(),
            semantic_type,
            case_exact,
            operator,
            operand,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub fn is_case_exact(&self) -> bool {
        self.case_exact
    }

    pub fn operator(&self) -> OperatorKind {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Evaluate against a row. Values that do not have the declared type never match.
    pub fn matches(&self, row: &Value) -> bool {
        let Some(actual) = TypedValue::from_json(self.semantic_type, row.get(&self.property))
        else {
            return false;
        };

        match (&self.operand, self.operator) {
            (Operand::List(candidates), _) => candidates
                .iter()
                .any(|candidate| actual.equals(candidate, self.case_exact)),
            (Operand::Single(expected), OperatorKind::Equal) => {
                actual.equals(expected, self.case_exact)
            }
            (Operand::Single(expected), OperatorKind::NotEqual) => {
                !actual.equals(expected, self.case_exact)
            }
            (Operand::Single(expected), op) if op.is_ordering() => {
                if actual.is_null() || expected.is_null() {
                    return false;
                }
                match actual.compare(expected, self.case_exact) {
                    Some(ordering) => ordering_satisfies(op, ordering),
                    None => false,
                }
            }
            (Operand::Single(expected), op) => {
                let (Some(haystack), Some(needle)) = (actual.as_str(), expected.as_str()) else {
                    return false;
                };
                if self.case_exact {
                    substring_matches(op, haystack, needle)
                } else {
                    substring_matches(op, &haystack.to_lowercase(), &needle.to_lowercase())
                }
            }
        }
    }
}

fn ordering_satisfies(operator: OperatorKind, ordering: Ordering) -> bool {
    match operator {
        OperatorKind::GreaterThan => ordering == Ordering::Greater,
        OperatorKind::GreaterOrEqual => ordering != Ordering::Less,
        OperatorKind::LessThan => ordering == Ordering::Less,
        OperatorKind::LessOrEqual => ordering != Ordering::Greater,
        _ => false,
    }
}

fn substring_matches(operator: OperatorKind, haystack: &str, needle: &str) -> bool {
    match operator {
        OperatorKind::Contains => haystack.contains(needle),
        OperatorKind::StartsWith => haystack.starts_with(needle),
        OperatorKind::EndsWith => haystack.ends_with(needle),
        _ => false,
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.property, self.operator.symbol())?;
        match &self.operand {
            Operand::Single(value) => write!(f, "{}", value),
            Operand::List(values) => {
                f.write_str("(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Conjunction of comparisons. The empty conjunction is always true.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Predicate {
    clauses: Vec<Comparison>,
}

impl Predicate {
    /// The predicate every row satisfies.
    pub fn always() -> Self {
        Self::default()
    }

    pub(crate) fn from_clauses(clauses: Vec<Comparison>) -> Self {
        Self { clauses }
    }

    pub fn is_always_true(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Conjoin `other` onto this predicate.
    pub fn and(mut self, other: Predicate) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    pub(crate) fn and_comparison(mut self, comparison: Comparison) -> Self {
        self.clauses.push(comparison);
        self
    }

    pub fn clauses(&self) -> &[Comparison] {
        &self.clauses
    }

    pub fn matches(&self, row: &Value) -> bool {
        self.clauses.iter().all(|clause| clause.matches(row))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("true");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
