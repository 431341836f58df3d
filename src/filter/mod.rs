//! Generic dynamic filter engine.
//!
//! Turns a declarative list of `(property, operator, value)` criteria into a
//! [`Predicate`] over any registered entity, without per-entity code. Property
//! names are resolved against the entity's [`EntitySchema`](crate::schema::EntitySchema)
//! and values are coerced to the declared semantic type at compile time.
//!
//! # Examples
//!
//! ```rust
//! use tenant_admin::filter::{compile, parse_filters};
//! use tenant_admin::schema::SchemaRegistry;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_embedded_schemas()?;
//! let criteria = parse_filters(Some(
//!     r#"[{"PropertyName":"PageCount","Operator":"GreaterThan","Value":"300"}]"#,
//! ))?;
//! let predicate = compile(registry.describe("Books")?, &criteria)?;
//!
//! assert!(predicate.matches(&json!({"PageCount": 412})));
//! assert!(!predicate.matches(&json!({"PageCount": 120})));
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod criteria;
pub mod predicate;
pub mod value;

pub use compiler::{FilterCompiler, compile};
pub use criteria::{FilterCriterion, OperatorKind, parse_filters};
pub use predicate::{Comparison, Operand, Predicate};
pub use value::TypedValue;
