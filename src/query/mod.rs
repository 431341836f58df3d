//! Query shaping: predicate + mandatory tenant scope + pagination → [`QueryPlan`].
//!
//! The shaper never performs I/O. It hands a fully scoped plan to the persistence
//! collaborator (see [`StorageProvider::execute`](crate::storage::StorageProvider::execute)).
//!
//! # Examples
//!
//! ```rust
//! use tenant_admin::filter::Predicate;
//! use tenant_admin::query::{Pagination, QueryShaper};
//! use tenant_admin::schema::SchemaRegistry;
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_embedded_schemas()?;
//! let tenant = Uuid::new_v4();
//! let plan = QueryShaper::default().shape(
//!     registry.describe("Role")?,
//!     Predicate::always(),
//!     tenant,
//!     Pagination::new(2, 10)?,
//! )?;
//!
//! assert_eq!(plan.skip(), 10);
//! assert_eq!(plan.limit(), 10);
//! assert_eq!(plan.predicate().to_string(), format!("TenantId == {}", tenant));
//! # Ok(())
//! # }
//! ```

use crate::error::{AdminError, AdminResult};
use crate::filter::{Comparison, Operand, OperatorKind, Predicate, TypedValue};
use crate::schema::EntitySchema;
use log::debug;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Page selection, both values 1-based and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_number: usize,
    page_size: usize,
}

impl Pagination {
    pub const DEFAULT_PAGE_NUMBER: usize = 1;
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Validate raw page parameters.
    pub fn new(page_number: i64, page_size: i64) -> AdminResult<Self> {
        if page_number < 1 {
            return Err(AdminError::invalid_request(format!(
                "pageNumber must be a positive integer, got {}",
                page_number
            )));
        }
        if page_size < 1 {
            return Err(AdminError::invalid_request(format!(
                "pageSize must be a positive integer, got {}",
                page_size
            )));
        }
        let to_usize = |value: i64| {
            usize::try_from(value)
                .map_err(|_| AdminError::invalid_request(format!("{} is out of range", value)))
        };
        Ok(Self {
            page_number: to_usize(page_number)?,
            page_size: to_usize(page_size)?,
        })
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_number: Self::DEFAULT_PAGE_NUMBER,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Base ordering applied before pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    PrimaryKeyAscending,
}

/// A tenant-scoped, paginated fetch over one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    entity: String,
    tenant_id: Uuid,
    predicate: Predicate,
    order: SortOrder,
    skip: usize,
    limit: usize,
}

impl QueryPlan {
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Tenant whose partition the plan reads.
    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// Storage partition the plan scans.
    pub fn partition(&self) -> String {
        self.tenant_id.to_string()
    }

    /// Caller predicate conjoined with the tenant clause (when the entity has one).
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn matches(&self, row: &Value) -> bool {
        self.predicate.matches(row)
    }

    /// Filter and paginate rows that are already in primary-key order.
    pub fn select<'a, I>(&self, ordered_rows: I) -> Vec<Value>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        ordered_rows
            .into_iter()
            .filter(|row| self.matches(row))
            .skip(self.skip)
            .take(self.limit)
            .cloned()
            .collect()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] WHERE {} ORDER BY Id SKIP {} LIMIT {}",
            self.entity, self.tenant_id, self.predicate, self.skip, self.limit
        )
    }
}

/// Builds [`QueryPlan`]s. Holds only the page-size ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryShaper {
    max_page_size: Option<usize>,
}

impl QueryShaper {
    pub fn new(max_page_size: Option<usize>) -> Self {
        Self { max_page_size }
    }

    /// Conjoin the tenant clause onto `predicate` and apply pagination.
    ///
    /// The tenant clause always comes first and cannot be removed by the caller's
    /// criteria; a caller-supplied tenant criterion can only narrow the result further.
    pub fn shape(
        &self,
        schema: &EntitySchema,
        predicate: Predicate,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> AdminResult<QueryPlan> {
        let scoped = match schema.tenant_property().and_then(|name| schema.property(name)) {
            Some(descriptor) => Predicate::always()
                .and_comparison(Comparison::new(
                    descriptor.name.clone(),
                    descriptor.semantic_type,
                    true,
                    OperatorKind::Equal,
                    Operand::Single(TypedValue::Guid(tenant_id)),
                ))
                .and(predicate),
            None => predicate,
        };

        let limit = match self.max_page_size {
            Some(max) if pagination.page_size() > max => {
                debug!(
                    "Clamping page size {} to {} for '{}'",
                    pagination.page_size(),
                    max,
                    schema.name()
                );
                max
            }
            _ => pagination.page_size(),
        };

        let skip = (pagination.page_number() - 1)
            .checked_mul(limit)
            .ok_or_else(|| AdminError::invalid_request("pageNumber is out of range"))?;

        let plan = QueryPlan {
            entity: schema.name().to_string(),
            tenant_id,
            predicate: scoped,
            order: SortOrder::PrimaryKeyAscending,
            skip,
            limit,
        };
        debug!("Shaped query plan: {}", plan);
        Ok(plan)
    }
}
