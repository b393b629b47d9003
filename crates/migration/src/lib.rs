//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_authentication_user;
mod m20240101_000002_create_user_profile;
mod m20240101_000003_create_user_skill;
mod m20240101_000004_create_work_experience;
mod m20240101_000005_create_education;
mod m20240101_000006_create_certification;
mod m20240101_000007_create_connection;
mod m20240101_000008_create_job;
mod m20240101_000009_create_message;
mod m20240101_000010_create_notification;
mod m20240101_000011_create_post;
mod m20240101_000099_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_authentication_user::Migration),
            Box::new(m20240101_000002_create_user_profile::Migration),
            Box::new(m20240101_000003_create_user_skill::Migration),
            Box::new(m20240101_000004_create_work_experience::Migration),
            Box::new(m20240101_000005_create_education::Migration),
            Box::new(m20240101_000006_create_certification::Migration),
            Box::new(m20240101_000007_create_connection::Migration),
            Box::new(m20240101_000008_create_job::Migration),
            Box::new(m20240101_000009_create_message::Migration),
            Box::new(m20240101_000010_create_notification::Migration),
            Box::new(m20240101_000011_create_post::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000099_add_indexes::Migration),
        ]
    }
}
