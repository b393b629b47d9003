//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login, email verification and password reset live here,
//! independent of the web framework.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;
pub mod crypto;
pub mod email;

pub use service::{AuthConfig, AuthService};
