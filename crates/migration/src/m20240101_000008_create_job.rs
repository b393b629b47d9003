use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(pk_auto(Job::Id))
                    .col(string_len(Job::Title, 255).not_null())
                    .col(text(Job::Description).not_null())
                    .col(string_len(Job::Company, 255).not_null())
                    .col(string_len(Job::Location, 255).not_null())
                    .col(double(Job::Salary).not_null())
                    .col(timestamp_with_time_zone(Job::PostedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Job::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Job { Table, Id, Title, Description, Company, Location, Salary, PostedAt }
