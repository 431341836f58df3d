//! Operation handler modules
//!
//! - CRUD operations (add, get by id, update, delete)
//! - Query operations (list)

pub mod crud;
pub mod query;

// Handler functions are called directly by the core dispatcher
