use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use models::notification;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewNotification {
    pub user_id: String,
    pub message: String,
}

pub async fn create_notification(db: &DatabaseConnection, input: &NewNotification) -> Result<notification::Model, ServiceError> {
    Ok(notification::create(db, &input.user_id, &input.message).await?)
}

/// Notifications for a user, newest first.
pub async fn list_for_user(db: &DatabaseConnection, user_id: &str) -> Result<Vec<notification::Model>, ServiceError> {
    let rows = notification::Entity::find()
        .filter(notification::Column::UserId.eq(user_id.trim()))
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn mark_as_read(db: &DatabaseConnection, id: i32) -> Result<notification::Model, ServiceError> {
    let mut am: notification::ActiveModel = notification::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Notification"))?
        .into();
    am.read = Set(true);
    Ok(am.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn note(user: &str, message: &str) -> NewNotification {
        NewNotification { user_id: user.into(), message: message.into() }
    }

    #[tokio::test]
    async fn newest_first_and_mark_read() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = create_notification(&db, &note("u1", "first")).await?;
        create_notification(&db, &note("u1", "second")).await?;
        create_notification(&db, &note("u2", "other")).await?;
        assert!(!first.read);

        let list = list_for_user(&db, "u1").await?;
        assert_eq!(list.iter().map(|n| n.message.as_str()).collect::<Vec<_>>(), vec!["second", "first"]);

        let read = mark_as_read(&db, first.id).await?;
        assert!(read.read);
        assert_eq!(mark_as_read(&db, 999).await.unwrap_err().to_string(), "Notification not found");
        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert_eq!(create_notification(&db, &note(" ", "x")).await.unwrap_err().to_string(), "User id is required");
        assert_eq!(create_notification(&db, &note("u", "")).await.unwrap_err().to_string(), "Message is required");
        Ok(())
    }
}
