use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(pk_auto(Message::Id))
                    .col(big_integer(Message::SenderId).not_null())
                    .col(big_integer(Message::ReceiverId).not_null())
                    .col(text(Message::Content).not_null())
                    .col(string_len(Message::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Message::SentAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Message::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Message { Table, Id, SenderId, ReceiverId, Content, Status, SentAt }
