//! Create `user_skill` table holding a profile's skill set.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserSkill::Table)
                    .if_not_exists()
                    .col(pk_auto(UserSkill::Id))
                    .col(integer(UserSkill::UserProfileId).not_null())
                    .col(string_len(UserSkill::Skill, 128).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skill_profile")
                            .from(UserSkill::Table, UserSkill::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserSkill::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserSkill { Table, Id, UserProfileId, Skill }

#[derive(DeriveIden)]
enum UserProfile { Table, Id }
