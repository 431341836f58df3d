//! Embedded entity catalog for the admin data model.
//!
//! The catalog is kept as a static JSON document so deployments and the
//! `filter-check` utility can load it without external schema files. Every entity
//! implicitly gets a Guid `Id`; `"tenantScoped": true` adds the `TenantId` foreign
//! key and `"audited": true` adds the CreatedBy/CreatedOn/UpdatedBy/UpdatedOn columns.

/// Returns the admin entity catalog as a JSON string.
pub fn admin_catalog() -> &'static str {
    r#"[
  {
    "name": "Tenant",
    "tenantProperty": "Id",
    "properties": [
      { "name": "Name", "type": "String" },
      { "name": "Domain", "type": "String", "nullable": true, "caseExact": false },
      { "name": "IsActive", "type": "Boolean" }
    ]
  },
  {
    "name": "User",
    "tenantScoped": true,
    "properties": [
      { "name": "UserName", "type": "String", "caseExact": false },
      { "name": "Email", "type": "String", "caseExact": false },
      { "name": "FirstName", "type": "String", "nullable": true },
      { "name": "LastName", "type": "String", "nullable": true },
      { "name": "IsActive", "type": "Boolean" },
      { "name": "LastLoginOn", "type": "DateTime", "nullable": true }
    ]
  },
  {
    "name": "Role",
    "tenantScoped": true,
    "audited": true,
    "properties": [
      { "name": "Name", "type": "String" },
      { "name": "Description", "type": "String", "nullable": true }
    ]
  },
  {
    "name": "Entity",
    "tenantScoped": true,
    "audited": true,
    "properties": [
      { "name": "Name", "type": "String" },
      { "name": "Description", "type": "String", "nullable": true }
    ]
  },
  {
    "name": "RoleEntitlement",
    "tenantScoped": true,
    "audited": true,
    "properties": [
      { "name": "RoleId", "type": "EntityReference" },
      { "name": "EntityName", "type": "String" },
      { "name": "Action", "type": "String" }
    ]
  },
  {
    "name": "UserInRole",
    "tenantScoped": true,
    "audited": true,
    "properties": [
      { "name": "UserId", "type": "EntityReference" },
      { "name": "RoleId", "type": "EntityReference" }
    ]
  },
  {
    "name": "UserToken",
    "tenantScoped": true,
    "properties": [
      { "name": "UserId", "type": "EntityReference" },
      { "name": "Token", "type": "String" },
      { "name": "ExpiresOn", "type": "DateTime" }
    ]
  },
  {
    "name": "Author",
    "properties": [
      { "name": "Name", "type": "String" },
      { "name": "Biography", "type": "String", "nullable": true }
    ]
  },
  {
    "name": "Books",
    "properties": [
      { "name": "AuthorId", "type": "EntityReference" },
      { "name": "Title", "type": "String" },
      { "name": "Price", "type": "Decimal" },
      { "name": "PageCount", "type": "Integer" },
      { "name": "InPrint", "type": "Boolean" },
      { "name": "PublishedOn", "type": "DateTime", "nullable": true }
    ]
  }
]"#
}
