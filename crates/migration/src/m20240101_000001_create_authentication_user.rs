//! Create `authentication_user` table.
//!
//! Holds login credentials plus the hashed one-time codes for email
//! verification and password reset.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthenticationUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthenticationUser::Id))
                    .col(string_len(AuthenticationUser::Email, 255).unique_key().not_null())
                    .col(string_len(AuthenticationUser::PasswordHash, 255).not_null())
                    .col(boolean(AuthenticationUser::EmailVerified).default(false))
                    .col(ColumnDef::new(AuthenticationUser::EmailVerificationToken).string_len(255).null())
                    .col(
                        ColumnDef::new(AuthenticationUser::EmailVerificationTokenExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(AuthenticationUser::PasswordResetToken).string_len(255).null())
                    .col(
                        ColumnDef::new(AuthenticationUser::PasswordResetTokenExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(AuthenticationUser::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AuthenticationUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AuthenticationUser {
    Table,
    Id,
    Email,
    PasswordHash,
    EmailVerified,
    EmailVerificationToken,
    EmailVerificationTokenExpiresAt,
    PasswordResetToken,
    PasswordResetTokenExpiresAt,
    CreatedAt,
}
