//! Typed values produced by coercing transport text or stored JSON.

use crate::schema::SemanticType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A value coerced to one of the semantic types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// Absent value of a nullable property
    Null,
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Guid(Uuid),
}

impl TypedValue {
    /// Coerce transport text to `semantic_type`.
    ///
    /// Strings are taken verbatim; every other type is trimmed first.
    pub fn parse(semantic_type: SemanticType, text: &str) -> Option<TypedValue> {
        if semantic_type == SemanticType::String {
            return Some(TypedValue::String(text.to_string()));
        }

        let text = text.trim();
        match semantic_type {
            SemanticType::String => None,
            SemanticType::Integer => text.parse().ok().map(TypedValue::Integer),
            SemanticType::Decimal => Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
                .map(TypedValue::Decimal),
            SemanticType::Boolean => {
                if text.eq_ignore_ascii_case("true") {
                    Some(TypedValue::Boolean(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Some(TypedValue::Boolean(false))
                } else {
                    None
                }
            }
            SemanticType::DateTime => parse_datetime(text).map(TypedValue::DateTime),
            SemanticType::Guid | SemanticType::EntityReference => {
                Uuid::parse_str(text).ok().map(TypedValue::Guid)
            }
        }
    }

    /// Read a stored JSON value as `semantic_type`.
    ///
    /// A missing or `null` value reads as [`TypedValue::Null`]; `None` means the
    /// stored value does not have the declared type.
    pub fn from_json(semantic_type: SemanticType, value: Option<&Value>) -> Option<TypedValue> {
        let value = match value {
            None | Some(Value::Null) => return Some(TypedValue::Null),
            Some(value) => value,
        };

        match (semantic_type, value) {
            (SemanticType::String, Value::String(s)) => Some(TypedValue::String(s.clone())),
            (SemanticType::Integer, Value::Number(n)) => n.as_i64().map(TypedValue::Integer),
            (SemanticType::Decimal, Value::Number(n)) => {
                TypedValue::parse(SemanticType::Decimal, &n.to_string())
            }
            (SemanticType::Decimal, Value::String(s)) => {
                TypedValue::parse(SemanticType::Decimal, s)
            }
            (SemanticType::Boolean, Value::Bool(b)) => Some(TypedValue::Boolean(*b)),
            (SemanticType::DateTime, Value::String(s)) => {
                parse_datetime(s.trim()).map(TypedValue::DateTime)
            }
            (SemanticType::Guid | SemanticType::EntityReference, Value::String(s)) => {
                Uuid::parse_str(s.trim()).ok().map(TypedValue::Guid)
            }
            _ => None,
        }
    }

    /// Canonical JSON form used when storing rows.
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::Null => Value::Null,
            TypedValue::String(s) => Value::String(s.clone()),
            TypedValue::Integer(i) => Value::from(*i),
            TypedValue::Decimal(d) => Value::String(d.to_string()),
            TypedValue::Boolean(b) => Value::Bool(*b),
            TypedValue::DateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            TypedValue::Guid(id) => Value::String(id.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compare two values of the same type. Mixed types are unordered.
    pub fn compare(&self, other: &TypedValue, case_exact: bool) -> Option<Ordering> {
        match (self, other) {
            (TypedValue::Null, TypedValue::Null) => Some(Ordering::Equal),
            (TypedValue::String(a), TypedValue::String(b)) => {
                if case_exact {
                    Some(a.cmp(b))
                } else {
                    Some(a.to_lowercase().cmp(&b.to_lowercase()))
                }
            }
            (TypedValue::Integer(a), TypedValue::Integer(b)) => Some(a.cmp(b)),
            (TypedValue::Decimal(a), TypedValue::Decimal(b)) => Some(a.cmp(b)),
            (TypedValue::Boolean(a), TypedValue::Boolean(b)) => Some(a.cmp(b)),
            (TypedValue::DateTime(a), TypedValue::DateTime(b)) => Some(a.cmp(b)),
            (TypedValue::Guid(a), TypedValue::Guid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn equals(&self, other: &TypedValue, case_exact: bool) -> bool {
        self.compare(other, case_exact) == Some(Ordering::Equal)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Null => f.write_str("null"),
            TypedValue::String(s) => write!(f, "'{}'", s),
            TypedValue::Integer(i) => write!(f, "{}", i),
            TypedValue::Decimal(d) => write!(f, "{}", d),
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::DateTime(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            TypedValue::Guid(id) => write!(f, "{}", id),
        }
    }
}

/// Parse RFC 3339, naive date-times and bare dates. Naive values are UTC.
fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
