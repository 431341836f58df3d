//! Wire format for filter criteria.
//!
//! Criteria arrive as a JSON array in the `filters` query parameter:
//!
//! ```text
//! [{"PropertyName":"Name","Operator":"Equal","Value":"Acme"}]
//! ```

use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Closed set of comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Contains,
    StartsWith,
    EndsWith,
    /// Membership in a delimited list
    In,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 10] = [
        OperatorKind::Equal,
        OperatorKind::NotEqual,
        OperatorKind::GreaterThan,
        OperatorKind::GreaterOrEqual,
        OperatorKind::LessThan,
        OperatorKind::LessOrEqual,
        OperatorKind::Contains,
        OperatorKind::StartsWith,
        OperatorKind::EndsWith,
        OperatorKind::In,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperatorKind::Equal => "Equal",
            OperatorKind::NotEqual => "NotEqual",
            OperatorKind::GreaterThan => "GreaterThan",
            OperatorKind::GreaterOrEqual => "GreaterOrEqual",
            OperatorKind::LessThan => "LessThan",
            OperatorKind::LessOrEqual => "LessOrEqual",
            OperatorKind::Contains => "Contains",
            OperatorKind::StartsWith => "StartsWith",
            OperatorKind::EndsWith => "EndsWith",
            OperatorKind::In => "In",
        }
    }

    /// Symbol used when rendering predicates.
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Equal => "==",
            OperatorKind::NotEqual => "!=",
            OperatorKind::GreaterThan => ">",
            OperatorKind::GreaterOrEqual => ">=",
            OperatorKind::LessThan => "<",
            OperatorKind::LessOrEqual => "<=",
            OperatorKind::Contains => "contains",
            OperatorKind::StartsWith => "starts with",
            OperatorKind::EndsWith => "ends with",
            OperatorKind::In => "in",
        }
    }

    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            OperatorKind::GreaterThan
                | OperatorKind::GreaterOrEqual
                | OperatorKind::LessThan
                | OperatorKind::LessOrEqual
        )
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorKind::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| AdminError::MalformedFilterSyntax {
                message: format!("unknown operator '{}'", s),
            })
    }
}

/// A single `(property, operator, value)` filter criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterCriterion {
    pub property_name: String,
    pub operator: OperatorKind,
    /// Transport-level text, coerced to the property's type at compile time
    #[serde(deserialize_with = "value_as_text")]
    pub value: String,
}

impl FilterCriterion {
    pub fn new(
        property_name: impl Into<String>,
        operator: OperatorKind,
        value: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            operator,
            value: value.into(),
        }
    }
}

// Clients occasionally send bare numbers or booleans; keep their textual form.
fn value_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(serde::de::Error::custom(format!(
            "filter value must be text, got {}",
            other
        ))),
    }
}

/// Parse the raw `filters` parameter.
///
/// An absent, blank or `null` parameter yields an empty criteria list.
pub fn parse_filters(raw: Option<&str>) -> AdminResult<Vec<FilterCriterion>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };

    let criteria: Option<Vec<FilterCriterion>> =
        serde_json::from_str(raw).map_err(|e| AdminError::MalformedFilterSyntax {
            message: e.to_string(),
        })?;

    Ok(criteria.unwrap_or_default())
}
