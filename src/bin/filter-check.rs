//! # Filter Check
//!
//! A command-line utility that compiles a list-filter against an entity catalog
//! and prints the resulting tenant-scoped query plan, so filter strings can be
//! checked before they are wired into a client.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin filter-check User '[{"PropertyName":"UserName","Operator":"StartsWith","Value":"ad"}]'
//! cargo run --bin filter-check -- --catalog my-entities.json Invoice '[]'
//! cargo run --bin filter-check -- --list
//! ```
//!
//! ## Output Examples
//!
//! ```text
//! Entity: User (tenant column: TenantId)
//! ✓ Filter compiled: UserName startsWith 'ad'
//!   Plan: User[00000000-0000-0000-0000-000000000000] WHERE ... ORDER BY Id SKIP 0 LIMIT 10
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: The filter compiled
//! - `1`: Bad arguments, unreadable catalog, or the filter was rejected

use std::env;
use std::fs;
use std::process;
use tenant_admin::filter::{FilterCompiler, parse_filters};
use tenant_admin::query::{Pagination, QueryShaper};
use tenant_admin::schema::SchemaRegistry;
use uuid::Uuid;

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let catalog = match take_option(&mut args, "--catalog") {
        Ok(catalog) => catalog,
        Err(e) => fail(&e),
    };
    let registry = match load_registry(catalog.as_deref()) {
        Ok(registry) => registry,
        Err(e) => fail(&format!("Failed to load catalog: {}", e)),
    };

    match args.as_slice() {
        [flag] if flag == "--list" => list_entities(&registry),
        [entity, filters] => check_filter(&registry, entity, filters),
        _ => {
            eprintln!("Usage: {} [--catalog <file>] <Entity> '<filters-json>'", program);
            eprintln!("       {} [--catalog <file>] --list", program);
            eprintln!();
            eprintln!("Examples:");
            eprintln!(
                "  {} Role '[{{\"PropertyName\":\"Name\",\"Operator\":\"Equal\",\"Value\":\"admin\"}}]'",
                program
            );
            eprintln!("  {} --list", program);
            process::exit(1);
        }
    }
}

fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>, String> {
    let Some(position) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if position + 1 >= args.len() {
        return Err(format!("{} needs a value", name));
    }
    let value = args.remove(position + 1);
    args.remove(position);
    Ok(Some(value))
}

fn load_registry(catalog: Option<&str>) -> Result<SchemaRegistry, Box<dyn std::error::Error>> {
    match catalog {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(SchemaRegistry::from_json_str(&content)?)
        }
        None => Ok(SchemaRegistry::with_embedded_schemas()?),
    }
}

fn list_entities(registry: &SchemaRegistry) {
    println!("Entities: {}", registry.len());
    for schema in registry.schemas() {
        let scope = schema.tenant_property().unwrap_or("-");
        println!("\n{} (tenant column: {})", schema.name(), scope);
        for property in schema.properties() {
            let mut flags = Vec::new();
            if property.nullable {
                flags.push("nullable");
            }
            if !property.case_exact {
                flags.push("case-insensitive");
            }
            println!(
                "  - {}: {}{}",
                property.name,
                property.semantic_type,
                if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                }
            );
        }
    }
}

fn check_filter(registry: &SchemaRegistry, entity: &str, filters: &str) {
    let schema = match registry.describe(entity) {
        Ok(schema) => schema,
        Err(e) => fail(&e.to_string()),
    };
    println!(
        "Entity: {} (tenant column: {})",
        schema.name(),
        schema.tenant_property().unwrap_or("-")
    );

    let compiled = parse_filters(Some(filters))
        .and_then(|criteria| FilterCompiler::default().compile(schema, &criteria));
    let predicate = match compiled {
        Ok(predicate) => predicate,
        Err(e) => fail(&format!("Filter rejected [{}]: {}", e.error_code(), e)),
    };
    println!("✓ Filter compiled: {}", predicate);

    match QueryShaper::default().shape(schema, predicate, Uuid::nil(), Pagination::default()) {
        Ok(plan) => println!("  Plan: {}", plan),
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("❌ {}", message);
    process::exit(1);
}
