//! Create `work_experience` table, owned by `user_profile`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkExperience::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkExperience::Id))
                    .col(integer(WorkExperience::UserProfileId).not_null())
                    .col(string_len(WorkExperience::Company, 255).not_null())
                    .col(string_len(WorkExperience::Position, 255).not_null())
                    .col(ColumnDef::new(WorkExperience::Location).string_len(255).null())
                    .col(ColumnDef::new(WorkExperience::Description).text().null())
                    .col(date(WorkExperience::StartDate).not_null())
                    .col(ColumnDef::new(WorkExperience::EndDate).date().null())
                    .col(boolean(WorkExperience::CurrentPosition).default(false))
                    .col(ColumnDef::new(WorkExperience::Industry).string_len(255).null())
                    .col(ColumnDef::new(WorkExperience::EmploymentType).string_len(64).null())
                    .col(ColumnDef::new(WorkExperience::SkillsUsed).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_experience_profile")
                            .from(WorkExperience::Table, WorkExperience::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WorkExperience::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WorkExperience {
    Table,
    Id,
    UserProfileId,
    Company,
    Position,
    Location,
    Description,
    StartDate,
    EndDate,
    CurrentPosition,
    Industry,
    EmploymentType,
    SkillsUsed,
}

#[derive(DeriveIden)]
enum UserProfile { Table, Id }
