use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

pub const STATUS_SENT: &str = "SENT";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sender_id: i64,
    pub receiver_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: String,
    #[serde(rename = "timestamp")]
    pub sent_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(sender_id: Option<i64>, receiver_id: Option<i64>, content: &str) -> Result<(i64, i64), ModelError> {
    let sender = sender_id.ok_or_else(|| ModelError::validation("Sender id is required"))?;
    let receiver = receiver_id.ok_or_else(|| ModelError::validation("Receiver id is required"))?;
    errors::require_text(content, "Message content is required")?;
    Ok((sender, receiver))
}

pub async fn create(db: &DatabaseConnection, sender_id: Option<i64>, receiver_id: Option<i64>, content: &str) -> Result<Model, ModelError> {
    let (sender, receiver) = validate(sender_id, receiver_id, content)?;
    let am = ActiveModel {
        sender_id: Set(sender),
        receiver_id: Set(receiver),
        content: Set(content.to_string()),
        status: Set(STATUS_SENT.to_string()),
        sent_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
