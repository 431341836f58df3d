//! Integration tests driving the admin server end to end over in-memory storage.

pub mod authorization;
pub mod concurrency;
pub mod end_to_end;
pub mod pagination;
pub mod tenant_isolation;
