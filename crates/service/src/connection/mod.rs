//! Connection requests between users: PENDING, then ACCEPTED or REJECTED.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ConnectionService;
