use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

use models::authentication_user;

use crate::auth::domain::AuthAccount;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn utc(ts: DateTime<FixedOffset>) -> DateTime<Utc> { ts.with_timezone(&Utc) }

fn to_account(m: authentication_user::Model) -> AuthAccount {
    AuthAccount {
        id: m.id,
        email: m.email,
        password_hash: m.password_hash,
        email_verified: m.email_verified,
        email_verification_token: m.email_verification_token,
        email_verification_token_expires_at: m.email_verification_token_expires_at.map(utc),
        password_reset_token: m.password_reset_token,
        password_reset_token_expires_at: m.password_reset_token_expires_at.map(utc),
        created_at: utc(m.created_at),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccount>, AuthError> {
        let res = authentication_user::find_by_email(&self.db, email).await?;
        Ok(res.map(to_account))
    }

    async fn create_account(&self, email: &str, password_hash: &str) -> Result<AuthAccount, AuthError> {
        let created = authentication_user::create(&self.db, email, password_hash).await?;
        Ok(to_account(created))
    }

    async fn save(&self, account: &AuthAccount) -> Result<AuthAccount, AuthError> {
        let mut am = authentication_user::Entity::find_by_id(account.id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?
            .ok_or_else(|| AuthError::Repository(format!("no account with id {}", account.id)))?
            .into_active_model();
        am.password_hash = Set(account.password_hash.clone());
        am.email_verified = Set(account.email_verified);
        am.email_verification_token = Set(account.email_verification_token.clone());
        am.email_verification_token_expires_at = Set(account.email_verification_token_expires_at.map(Into::into));
        am.password_reset_token = Set(account.password_reset_token.clone());
        am.password_reset_token_expires_at = Set(account.password_reset_token_expires_at.map(Into::into));
        let updated = am.update(&self.db).await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(to_account(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn create_find_and_save() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAuthRepository { db: get_db().await? };
        let created = repo.create_account("ada@example.com", "hash").await?;
        assert!(repo.find_by_email("nobody@example.com").await?.is_none());

        let mut account = repo.find_by_email("ada@example.com").await?.unwrap();
        assert_eq!(account.id, created.id);
        account.email_verified = true;
        account.password_reset_token = Some("token-hash".into());
        account.password_reset_token_expires_at = Some(Utc::now());
        repo.save(&account).await?;

        let reloaded = repo.find_by_email("ada@example.com").await?.unwrap();
        assert!(reloaded.email_verified);
        assert_eq!(reloaded.password_reset_token.as_deref(), Some("token-hash"));
        assert!(reloaded.password_reset_token_expires_at.is_some());
        Ok(())
    }
}
