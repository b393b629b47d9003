//! User profiles and the collections they own: skills, work experience, education
//! and certifications.

pub mod domain;
pub mod completion;
pub mod profile_service;
pub mod work_experience_service;
pub mod education_service;
pub mod certification_service;
pub mod uploads;

pub use uploads::{ImageKind, UploadStore};
