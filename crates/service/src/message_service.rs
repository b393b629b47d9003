use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::message;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendMessage {
    pub sender_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub content: String,
}

pub async fn send_message(db: &DatabaseConnection, input: &SendMessage) -> Result<message::Model, ServiceError> {
    let sent = message::create(db, input.sender_id, input.receiver_id, &input.content).await?;
    info!(message_id = sent.id, sender_id = sent.sender_id, receiver_id = sent.receiver_id, "message_sent");
    Ok(sent)
}

pub async fn get_message(db: &DatabaseConnection, id: i32) -> Result<message::Model, ServiceError> {
    message::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Message"))
}

/// Messages exchanged between two users in either direction, oldest first.
pub async fn get_conversation(db: &DatabaseConnection, user1: i64, user2: i64) -> Result<Vec<message::Model>, ServiceError> {
    let between = |from: i64, to: i64| {
        Condition::all()
            .add(message::Column::SenderId.eq(from))
            .add(message::Column::ReceiverId.eq(to))
    };
    let rows = message::Entity::find()
        .filter(Condition::any().add(between(user1, user2)).add(between(user2, user1)))
        .order_by_asc(message::Column::SentAt)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Messages received by the user, newest first.
pub async fn get_inbox(db: &DatabaseConnection, user_id: i64) -> Result<Vec<message::Model>, ServiceError> {
    let rows = message::Entity::find()
        .filter(message::Column::ReceiverId.eq(user_id))
        .order_by_desc(message::Column::SentAt)
        .order_by_desc(message::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn delete_message(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = message::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Message"));
    }
    Ok(())
}
