//! Builder utilities for operation requests
//!
//! Convenience constructors for [`AdminOperationRequest`](super::AdminOperationRequest).

pub mod request;
