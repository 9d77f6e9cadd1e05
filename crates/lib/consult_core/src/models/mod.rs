//! Domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! shapes in `consult_api::models`.

pub mod dashboard;
pub mod message;
