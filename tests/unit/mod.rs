//! Unit-level tests against the public filter and query API.

pub mod properties;
