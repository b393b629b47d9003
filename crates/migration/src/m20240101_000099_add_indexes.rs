use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Skills: one row per (profile, skill)
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_skill_profile_skill")
                    .table(UserSkill::Table)
                    .col(UserSkill::UserProfileId)
                    .col(UserSkill::Skill)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Profile children: lookups by owning profile
        manager
            .create_index(
                Index::create()
                    .name("idx_work_experience_profile")
                    .table(WorkExperience::Table)
                    .col(WorkExperience::UserProfileId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_education_profile")
                    .table(Education::Table)
                    .col(Education::UserProfileId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_certification_profile")
                    .table(Certification::Table)
                    .col(Certification::UserProfileId)
                    .to_owned(),
            )
            .await?;

        // Connection: pair lookups in either direction
        manager
            .create_index(
                Index::create()
                    .name("idx_connection_pair")
                    .table(Connection::Table)
                    .col(Connection::RequesterId)
                    .col(Connection::ReceiverId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_connection_receiver")
                    .table(Connection::Table)
                    .col(Connection::ReceiverId)
                    .to_owned(),
            )
            .await?;

        // Message: inbox and conversation queries
        manager
            .create_index(
                Index::create()
                    .name("idx_message_receiver")
                    .table(Message::Table)
                    .col(Message::ReceiverId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_message_sender_receiver")
                    .table(Message::Table)
                    .col(Message::SenderId)
                    .col(Message::ReceiverId)
                    .to_owned(),
            )
            .await?;

        // Notification: per-user feed
        manager
            .create_index(
                Index::create()
                    .name("idx_notification_user")
                    .table(Notification::Table)
                    .col(Notification::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_user_skill_profile_skill").table(UserSkill::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_work_experience_profile").table(WorkExperience::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_education_profile").table(Education::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_certification_profile").table(Certification::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_connection_pair").table(Connection::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_connection_receiver").table(Connection::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_message_receiver").table(Message::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_message_sender_receiver").table(Message::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_notification_user").table(Notification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserSkill { Table, UserProfileId, Skill }

#[derive(DeriveIden)]
enum WorkExperience { Table, UserProfileId }

#[derive(DeriveIden)]
enum Education { Table, UserProfileId }

#[derive(DeriveIden)]
enum Certification { Table, UserProfileId }

#[derive(DeriveIden)]
enum Connection { Table, RequesterId, ReceiverId }

#[derive(DeriveIden)]
enum Message { Table, SenderId, ReceiverId }

#[derive(DeriveIden)]
enum Notification { Table, UserId }
