//! Create `certification` table, owned by `user_profile`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certification::Table)
                    .if_not_exists()
                    .col(pk_auto(Certification::Id))
                    .col(integer(Certification::UserProfileId).not_null())
                    .col(string_len(Certification::Name, 255).not_null())
                    .col(string_len(Certification::IssuingOrganization, 255).not_null())
                    .col(ColumnDef::new(Certification::CredentialId).string_len(255).null())
                    .col(ColumnDef::new(Certification::CredentialUrl).string_len(512).null())
                    .col(date(Certification::IssueDate).not_null())
                    .col(ColumnDef::new(Certification::ExpirationDate).date().null())
                    .col(boolean(Certification::DoesNotExpire).default(false))
                    .col(ColumnDef::new(Certification::Description).text().null())
                    .col(ColumnDef::new(Certification::Skills).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certification_profile")
                            .from(Certification::Table, Certification::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Certification::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Certification {
    Table,
    Id,
    UserProfileId,
    Name,
    IssuingOrganization,
    CredentialId,
    CredentialUrl,
    IssueDate,
    ExpirationDate,
    DoesNotExpire,
    Description,
    Skills,
}

#[derive(DeriveIden)]
enum UserProfile { Table, Id }
