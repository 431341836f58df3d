//! Admin server: the generic CRUD surface over every registered entity.
//!
//! Each request flows once through the pipeline
//! gate → (list only) filter compiler → query shaper → storage,
//! and no state is retained between requests beyond the immutable schema
//! registry and the persisted rows.
//!
//! # Module Organization
//!
//! * [`core`] - `AdminServer` struct and assembly
//! * [`builder`] - fluent `AdminServerBuilder`
//! * [`operations`] - Add / List / GetById / Update / Delete
//! * `rows` - body validation, canonical values and audit stamping

pub mod builder;
pub mod core;
pub mod operations;
mod rows;


pub use builder::AdminServerBuilder;
pub use core::AdminServer;
pub use operations::ListParams;
