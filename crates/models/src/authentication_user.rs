use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;

use crate::errors::{self, ModelError};

/// Login account. Never serialized: it carries the password and token hashes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "authentication_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub email_verified: bool,
    pub email_verification_token: Option<String>,
    pub email_verification_token_expires_at: Option<DateTimeWithTimeZone>,
    pub password_reset_token: Option<String>,
    pub password_reset_token_expires_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    errors::require_text(email, "Email address is required")?;
    let email = email.trim();
    let invalid = || ModelError::validation("Please enter a valid email address (e.g., user@example.com)");
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    errors::require_text(password, "Password is required")
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email.trim())).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, email: &str, password_hash: &str) -> Result<Model, ModelError> {
    validate_email(email)?;
    let am = ActiveModel {
        email: Set(email.trim().to_string()),
        password_hash: Set(password_hash.to_string()),
        email_verified: Set(false),
        email_verification_token: Set(None),
        email_verification_token_expires_at: Set(None),
        password_reset_token: Set(None),
        password_reset_token_expires_at: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
