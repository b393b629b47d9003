use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(title: &str, content: &str, author: &str) -> Result<(), ModelError> {
    errors::require_text(title, "Title is required")?;
    errors::require_text(content, "Content is required")?;
    errors::require_text(author, "Author is required")?;
    Ok(())
}

pub async fn create(db: &DatabaseConnection, title: &str, content: &str, author: &str) -> Result<Model, ModelError> {
    validate(title, content, author)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        title: Set(title.trim().to_string()),
        content: Set(content.to_string()),
        author: Set(author.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
