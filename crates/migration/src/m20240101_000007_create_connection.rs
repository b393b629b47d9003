//! Create `connection` table.
//!
//! User ids are plain references; the one-pending-request rule lives in the
//! connection service, not in a storage constraint.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Connection::Table)
                    .if_not_exists()
                    .col(pk_auto(Connection::Id))
                    .col(big_integer(Connection::RequesterId).not_null())
                    .col(big_integer(Connection::ReceiverId).not_null())
                    .col(string_len(Connection::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Connection::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Connection::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Connection::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Connection { Table, Id, RequesterId, ReceiverId, Status, CreatedAt, UpdatedAt }
