//! Create `user_profile` table, the aggregate root of the profile tables.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(UserProfile::Id))
                    .col(ColumnDef::new(UserProfile::Email).string_len(255).unique_key().null())
                    .col(string_len(UserProfile::FullName, 128).not_null())
                    .col(ColumnDef::new(UserProfile::Bio).text().null())
                    .col(ColumnDef::new(UserProfile::Location).string_len(255).null())
                    .col(ColumnDef::new(UserProfile::ProfilePictureUrl).string_len(512).null())
                    .col(ColumnDef::new(UserProfile::HeaderImage).string_len(512).null())
                    .col(integer(UserProfile::ProfileCompletionPercentage).default(0))
                    .col(ColumnDef::new(UserProfile::PhoneNumber).string_len(32).null())
                    .col(ColumnDef::new(UserProfile::Website).string_len(512).null())
                    .col(ColumnDef::new(UserProfile::LinkedinUrl).string_len(512).null())
                    .col(ColumnDef::new(UserProfile::GithubUrl).string_len(512).null())
                    .col(boolean(UserProfile::ProfilePublic).default(true))
                    .col(boolean(UserProfile::ContactInfoPublic).default(false))
                    .col(boolean(UserProfile::WorkExperiencePublic).default(true))
                    .col(boolean(UserProfile::EducationPublic).default(true))
                    .col(boolean(UserProfile::SkillsPublic).default(true))
                    .col(ColumnDef::new(UserProfile::CurrentPosition).string_len(255).null())
                    .col(ColumnDef::new(UserProfile::CurrentCompany).string_len(255).null())
                    .col(ColumnDef::new(UserProfile::Industry).string_len(255).null())
                    .col(ColumnDef::new(UserProfile::Headline).string_len(255).null())
                    .col(timestamp_with_time_zone(UserProfile::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(UserProfile::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserProfile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserProfile {
    Table,
    Id,
    Email,
    FullName,
    Bio,
    Location,
    ProfilePictureUrl,
    HeaderImage,
    ProfileCompletionPercentage,
    PhoneNumber,
    Website,
    LinkedinUrl,
    GithubUrl,
    ProfilePublic,
    ContactInfoPublic,
    WorkExperiencePublic,
    EducationPublic,
    SkillsPublic,
    CurrentPosition,
    CurrentCompany,
    Industry,
    Headline,
    CreatedAt,
    UpdatedAt,
}
