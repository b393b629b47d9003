//! Create `education` table, owned by `user_profile`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Education::Table)
                    .if_not_exists()
                    .col(pk_auto(Education::Id))
                    .col(integer(Education::UserProfileId).not_null())
                    .col(string_len(Education::Institution, 255).not_null())
                    .col(string_len(Education::Degree, 255).not_null())
                    .col(string_len(Education::FieldOfStudy, 255).not_null())
                    .col(ColumnDef::new(Education::Location).string_len(255).null())
                    .col(ColumnDef::new(Education::Description).text().null())
                    .col(date(Education::StartDate).not_null())
                    .col(ColumnDef::new(Education::EndDate).date().null())
                    .col(boolean(Education::CurrentEducation).default(false))
                    .col(ColumnDef::new(Education::Grade).string_len(64).null())
                    .col(ColumnDef::new(Education::Activities).text().null())
                    .col(ColumnDef::new(Education::Achievements).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_education_profile")
                            .from(Education::Table, Education::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Education::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Education {
    Table,
    Id,
    UserProfileId,
    Institution,
    Degree,
    FieldOfStudy,
    Location,
    Description,
    StartDate,
    EndDate,
    CurrentEducation,
    Grade,
    Activities,
    Achievements,
}

#[derive(DeriveIden)]
enum UserProfile { Table, Id }
