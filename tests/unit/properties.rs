//! Property-based tests for tenant scoping and pagination.

use crate::common::{CRUD, TenantSeed, account_schema, context, server_over};
use crate::common::builders::AccountBuilder;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tenant_admin::filter::{FilterCriterion, OperatorKind, compile};
use tenant_admin::query::{Pagination, QueryShaper};
use tenant_admin::storage::InMemoryStorage;
use tenant_admin::{AdminError, ListParams};
use uuid::Uuid;

fn numbered_rows(count: usize, tenant: Uuid) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "Id": Uuid::from_u128(i as u128 + 1).to_string(),
                "TenantId": tenant.to_string(),
                "Name": format!("acct-{}", i),
                "Visits": i
            })
        })
        .collect()
}

prop_compose! {
    fn tenant_criterion_strategy()
        (other in any::<u128>(), operator in prop::sample::select(vec![
            OperatorKind::Equal, OperatorKind::NotEqual, OperatorKind::In]))
        -> FilterCriterion {
        FilterCriterion::new("TenantId", operator, Uuid::from_u128(other).to_string())
    }
}

proptest! {
    #[test]
    fn test_tenant_clause_survives_any_criteria(
        criterion in tenant_criterion_strategy(),
        own in any::<u128>(),
        foreign in any::<u128>(),
    ) {
        let own = Uuid::from_u128(own);
        let foreign = Uuid::from_u128(foreign);
        prop_assume!(own != foreign);

        let schema = account_schema();
        let predicate = compile(&schema, &[criterion]).unwrap();
        let plan = QueryShaper::default()
            .shape(&schema, predicate, own, Pagination::default())
            .unwrap();

        let first = &plan.predicate().clauses()[0];
        prop_assert_eq!(first.property(), "TenantId");
        prop_assert_eq!(first.operator(), OperatorKind::Equal);

        let foreign_row = json!({"TenantId": foreign.to_string()});
        prop_assert!(!plan.matches(&foreign_row));
    }

    #[test]
    fn test_pages_partition_the_ordered_rows(
        count in 0usize..60,
        page_size in 1i64..15,
        page_number in 1i64..8,
    ) {
        let tenant = Uuid::new_v4();
        let rows = numbered_rows(count, tenant);
        let schema = account_schema();
        let plan = QueryShaper::default()
            .shape(&schema, compile(&schema, &[]).unwrap(), tenant, Pagination::new(page_number, page_size).unwrap())
            .unwrap();

        let page = plan.select(&rows);
        let start = ((page_number - 1) * page_size) as usize;
        let expected: Vec<Value> = rows.iter().skip(start).take(page_size as usize).cloned().collect();
        prop_assert_eq!(page, expected);
    }

    #[test]
    fn test_non_positive_paging_is_rejected(page_number in -5i64..1, page_size in -5i64..1) {
        prop_assert!(matches!(Pagination::new(page_number, 10), Err(AdminError::InvalidRequest { .. })), "expected InvalidRequest");
        prop_assert!(matches!(Pagination::new(1, page_size), Err(AdminError::InvalidRequest { .. })), "expected InvalidRequest");
    }

    #[test]
    fn test_listed_names_round_trip(name in "[A-Za-z][A-Za-z0-9 ]{0,20}") {
        tokio_test::block_on(async {
            let storage = Arc::new(InMemoryStorage::new());
            let seed = TenantSeed::new(&storage).await;
            let admin = seed.admin_of(&["Account"], &CRUD).await;
            let server = server_over(&storage);
            let ctx = context(admin);

            server.add(&ctx, "api/account", AccountBuilder::new(&name).build()).await.unwrap();

            let filters = serde_json::to_string(&[FilterCriterion::new("Name", OperatorKind::Equal, name.clone())]).unwrap();
            let rows = server
                .list(&ctx, "api/account", &ListParams::new().with_filters(filters))
                .await
                .unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0]["Name"], json!(name));
        });
    }
}
