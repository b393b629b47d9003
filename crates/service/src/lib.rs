//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod auth;
pub mod connection;
pub mod profile;
pub mod job_service;
pub mod post_service;
pub mod message_service;
pub mod notification_service;
