//! Filter compiler: criteria list + entity schema → [`Predicate`].

use super::criteria::{FilterCriterion, OperatorKind};
use super::predicate::{Comparison, Operand, Predicate};
use super::value::TypedValue;
use crate::error::{AdminError, AdminResult};
use crate::schema::{EntitySchema, PropertyDescriptor};
use log::{debug, trace};

/// Literal meaning "no value" for nullable properties.
const NULL_LITERAL: &str = "null";

/// Compiles flat, AND-combined criteria lists against an entity schema.
///
/// The compiler holds no per-request state and can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler {
    in_list_delimiter: char,
}

impl Default for FilterCompiler {
    fn default() -> Self {
        Self {
            in_list_delimiter: ',',
        }
    }
}

impl FilterCompiler {
    pub fn new(in_list_delimiter: char) -> Self {
        Self { in_list_delimiter }
    }

    pub fn in_list_delimiter(&self) -> char {
        self.in_list_delimiter
    }

    /// Compile `criteria` into one conjunctive predicate.
    ///
    /// Fails on the first criterion that names an unknown property, carries a value
    /// that does not coerce to the property's type, or applies an operator the type
    /// does not support. An empty list compiles to the always-true predicate.
    pub fn compile(
        &self,
        schema: &EntitySchema,
        criteria: &[FilterCriterion],
    ) -> AdminResult<Predicate> {
        let mut clauses = Vec::with_capacity(criteria.len());
        for criterion in criteria {
            clauses.push(self.compile_criterion(schema, criterion)?);
        }

        let predicate = Predicate::from_clauses(clauses);
        debug!(
            "Compiled {} criteria for '{}': {}",
            criteria.len(),
            schema.name(),
            predicate
        );
        Ok(predicate)
    }

    fn compile_criterion(
        &self,
        schema: &EntitySchema,
        criterion: &FilterCriterion,
    ) -> AdminResult<Comparison> {
        trace!("Compiling criterion {:?}", criterion);

        let descriptor = schema
            .property(&criterion.property_name)
            .ok_or_else(|| AdminError::unknown_property(schema.name(), &criterion.property_name))?;

        if !descriptor.semantic_type.supports(criterion.operator) {
            return Err(AdminError::UnsupportedOperator {
                property: descriptor.name.clone(),
                operator: criterion.operator,
                semantic_type: descriptor.semantic_type,
            });
        }

        let operand = match criterion.operator {
            OperatorKind::In => Operand::List(
                criterion
                    .value
                    .split(self.in_list_delimiter)
                    .map(|item| coerce(descriptor, criterion.operator, item.trim()))
                    .collect::<AdminResult<Vec<_>>>()?,
            ),
            operator => Operand::Single(coerce(descriptor, operator, &criterion.value)?),
        };

        Ok(Comparison::new(
            descriptor.name.clone(),
            descriptor.semantic_type,
            descriptor.case_exact,
            criterion.operator,
            operand,
        ))
    }
}

/// Compile with the default `,` list delimiter.
pub fn compile(schema: &EntitySchema, criteria: &[FilterCriterion]) -> AdminResult<Predicate> {
    FilterCompiler::default().compile(schema, criteria)
}

fn coerce(
    descriptor: &PropertyDescriptor,
    operator: OperatorKind,
    text: &str,
) -> AdminResult<TypedValue> {
    let equality = matches!(
        operator,
        OperatorKind::Equal | OperatorKind::NotEqual | OperatorKind::In
    );
    if descriptor.nullable && equality && text.trim() == NULL_LITERAL {
        return Ok(TypedValue::Null);
    }

    TypedValue::parse(descriptor.semantic_type, text)
        .ok_or_else(|| AdminError::type_mismatch(&descriptor.name, descriptor.semantic_type, text))
}
