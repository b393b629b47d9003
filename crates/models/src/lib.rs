//! SeaORM entities for every Networkpro table, plus the field rules and small
//! insert helpers shared by the service layer.

pub mod errors;
pub mod db;
pub mod authentication_user;
pub mod user_profile;
pub mod user_skill;
pub mod work_experience;
pub mod education;
pub mod certification;
pub mod connection;
pub mod job;
pub mod message;
pub mod notification;
pub mod post;

#[cfg(test)]
mod tests;
