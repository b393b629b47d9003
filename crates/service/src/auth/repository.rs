use async_trait::async_trait;

use super::domain::AuthAccount;
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccount>, AuthError>;
    async fn create_account(&self, email: &str, password_hash: &str) -> Result<AuthAccount, AuthError>;
    /// Persist every mutable field of `account`.
    async fn save(&self, account: &AuthAccount) -> Result<AuthAccount, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        accounts: Mutex<HashMap<String, AuthAccount>>, // key: email
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccount>, AuthError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(email).cloned())
        }

        async fn create_account(&self, email: &str, password_hash: &str) -> Result<AuthAccount, AuthError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::Conflict);
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let account = AuthAccount {
                id: *next_id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                email_verified: false,
                email_verification_token: None,
                email_verification_token_expires_at: None,
                password_reset_token: None,
                password_reset_token_expires_at: None,
                created_at: chrono::Utc::now(),
            };
            accounts.insert(email.to_string(), account.clone());
            Ok(account)
        }

        async fn save(&self, account: &AuthAccount) -> Result<AuthAccount, AuthError> {
            let mut accounts = self.accounts.lock().unwrap();
            if !accounts.contains_key(&account.email) {
                return Err(AuthError::Repository(format!("no account for {}", account.email)));
            }
            accounts.insert(account.email.clone(), account.clone());
            Ok(account.clone())
        }
    }
}
