//! Schema registry describing every entity the admin core can address.
//!
//! Entity and property names are bound once at start-up into [`EntitySchema`]
//! tables; request-time lookups go through [`SchemaRegistry::describe`] and never
//! inspect row data to discover types.
//!
//! # Examples
//!
//! ```rust
//! use tenant_admin::schema::{EntitySchema, SchemaRegistry, SemanticType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::builder()
//!     .entity(
//!         EntitySchema::builder("Invoice")
//!             .tenant_scoped()
//!             .field("Number", SemanticType::String)
//!             .field("Total", SemanticType::Decimal)
//!             .build()?,
//!     )
//!     .build()?;
//!
//! let invoice = registry.describe("Invoice")?;
//! assert_eq!(invoice.tenant_property(), Some("TenantId"));
//! assert!(registry.describe("invoice").is_err());
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;


pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use types::{EntitySchema, EntitySchemaBuilder, PRIMARY_KEY, PropertyDescriptor, SemanticType};
