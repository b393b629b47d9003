use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, debug, warn, instrument};

use models::authentication_user::{validate_email, validate_password};

use super::crypto;
use super::domain::{AuthAccount, AuthResponse, AuthUser, LoginInput, RegisterInput};
use super::email::EmailSender;
use super::errors::AuthError;
use super::repository::AuthRepository;

pub const VERIFICATION_SUBJECT: &str = "Email Verification";
pub const PASSWORD_RESET_SUBJECT: &str = "Password Reset";

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub verification_token_ttl_minutes: i64,
}

impl AuthConfig {
    pub fn from_settings(s: &configs::AuthSettings) -> Self {
        Self {
            jwt_secret: s.jwt_secret.clone(),
            jwt_ttl_hours: s.jwt_ttl_hours,
            verification_token_ttl_minutes: s.verification_token_ttl_minutes,
        }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    mailer: Arc<dyn EmailSender>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, mailer: Arc<dyn EmailSender>, cfg: AuthConfig) -> Self { Self { repo, mailer, cfg } }

    /// Register a new account, email a verification code and return a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository, email::LoggingEmailSender};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), jwt_ttl_hours: 1, verification_token_ttl_minutes: 1 };
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), Arc::new(LoggingEmailSender), cfg);
    /// let input = RegisterInput { email: "user@example.com".into(), password: "Secret123".into() };
    /// let res = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(res.message, "User registered successfully");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResponse, AuthError> {
        validate_email(&input.email)?;
        validate_password(&input.password)?;
        let email = input.email.trim();
        if let Some(existing) = self.repo.find_by_email(email).await? {
            debug!("account exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let hash = crypto::hash_secret(&input.password)?;
        let mut account = self.repo.create_account(email, &hash).await?;
        let code = self.issue_verification_code(&mut account)?;
        let account = self.repo.save(&account).await?;
        self.deliver(&account.email, VERIFICATION_SUBJECT, &self.verification_body(&code)).await;

        let token = crypto::issue_token(&self.cfg.jwt_secret, &account.email, self.cfg.jwt_ttl_hours)?;
        info!(user_id = account.id, email = %account.email, "user_registered");
        Ok(AuthResponse { token, message: "User registered successfully".into() })
    }

    /// Authenticate with email and password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository, email::LoggingEmailSender};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let cfg = AuthConfig { jwt_secret: "secret".into(), jwt_ttl_hours: 1, verification_token_ttl_minutes: 1 };
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), Arc::new(LoggingEmailSender), cfg);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let res = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(res.message, "Authentication Succeeded");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse, AuthError> {
        validate_email(&input.email)?;
        validate_password(&input.password)?;
        let account = self.repo
            .find_by_email(input.email.trim())
            .await?
            .ok_or_else(|| AuthError::UserNotFound("User not found. Please sign up first.".into()))?;

        if !crypto::verify_secret(&input.password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = crypto::issue_token(&self.cfg.jwt_secret, &account.email, self.cfg.jwt_ttl_hours)?;
        info!(user_id = account.id, "user_logged_in");
        Ok(AuthResponse { token, message: "Authentication Succeeded".into() })
    }

    /// Resolve a bearer token to the account it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = crypto::decode_token(&self.cfg.jwt_secret, token)?;
        let account = self.repo.find_by_email(&claims.sub).await?.ok_or(AuthError::Unauthorized)?;
        Ok(AuthUser::from(&account))
    }

    pub async fn get_user(&self, email: &str) -> Result<AuthUser, AuthError> {
        let account = self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound("User not found".into()))?;
        Ok(AuthUser::from(&account))
    }

    /// Issue a fresh verification code; only unverified accounts qualify.
    #[instrument(skip(self))]
    pub async fn send_email_verification_token(&self, email: &str) -> Result<(), AuthError> {
        let mut account = match self.repo.find_by_email(email).await? {
            Some(a) if !a.email_verified => a,
            _ => {
                return Err(AuthError::Validation(
                    "Email verification token expired, or email is already verified".into(),
                ))
            }
        };
        let code = self.issue_verification_code(&mut account)?;
        self.repo.save(&account).await?;
        self.deliver(&account.email, VERIFICATION_SUBJECT, &self.verification_body(&code)).await;
        info!(user_id = account.id, "email_verification_token_sent");
        Ok(())
    }

    /// Mark the email verified when `token` matches an unexpired code.
    #[instrument(skip(self, token))]
    pub async fn validate_email_verification_token(&self, email: &str, token: &str) -> Result<(), AuthError> {
        let failed = || AuthError::TokenInvalid("Email verification token failed.".into());
        let mut account = self.repo.find_by_email(email).await?.ok_or_else(failed)?;
        let matches = account
            .email_verification_token
            .as_deref()
            .map(|hash| crypto::verify_secret(token.trim(), hash))
            .unwrap_or(false);
        if !matches {
            return Err(failed());
        }
        let expired = account
            .email_verification_token_expires_at
            .map(|at| at < Utc::now())
            .unwrap_or(true);
        if expired {
            return Err(AuthError::TokenExpired("Email verification token expired.".into()));
        }

        account.email_verified = true;
        account.email_verification_token = None;
        account.email_verification_token_expires_at = None;
        self.repo.save(&account).await?;
        info!(user_id = account.id, "email_verified");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn send_password_reset_token(&self, email: &str) -> Result<(), AuthError> {
        let mut account = self.repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AuthError::UserNotFound("User not found.".into()))?;
        let code = crypto::generate_code();
        account.password_reset_token = Some(crypto::hash_secret(&code)?);
        account.password_reset_token_expires_at = Some(self.code_expiry());
        self.repo.save(&account).await?;
        let body = format!(
            "You requested a password reset.\n\nEnter this code to reset your password: {code}. The code will expire in {} minutes.",
            self.cfg.verification_token_ttl_minutes
        );
        self.deliver(&account.email, PASSWORD_RESET_SUBJECT, &body).await;
        info!(user_id = account.id, "password_reset_token_sent");
        Ok(())
    }

    /// Replace the password when `token` is the unexpired reset code.
    #[instrument(skip(self, new_password, token))]
    pub async fn reset_password(&self, email: &str, new_password: &str, token: &str) -> Result<(), AuthError> {
        let mut account = self.repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AuthError::UserNotFound("User not found.".into()))?;

        let expired = account
            .password_reset_token_expires_at
            .map(|at| at < Utc::now())
            .unwrap_or(true);
        if expired {
            return Err(AuthError::TokenExpired("Password token expired.".into()));
        }
        let matches = account
            .password_reset_token
            .as_deref()
            .map(|hash| crypto::verify_secret(token.trim(), hash))
            .unwrap_or(false);
        if !matches {
            return Err(AuthError::TokenInvalid("Password token failed.".into()));
        }
        validate_password(new_password)?;

        account.password_hash = crypto::hash_secret(new_password)?;
        account.password_reset_token = None;
        account.password_reset_token_expires_at = None;
        self.repo.save(&account).await?;
        info!(user_id = account.id, "password_reset");
        Ok(())
    }

    /// Create the account unless it already exists. Returns whether it was created.
    pub async fn ensure_account(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        validate_email(email)?;
        validate_password(password)?;
        if self.repo.find_by_email(email.trim()).await?.is_some() {
            return Ok(false);
        }
        let hash = crypto::hash_secret(password)?;
        let account = self.repo.create_account(email.trim(), &hash).await?;
        info!(user_id = account.id, email = %account.email, "seed_account_created");
        Ok(true)
    }

    fn code_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::minutes(self.cfg.verification_token_ttl_minutes)
    }

    fn issue_verification_code(&self, account: &mut AuthAccount) -> Result<String, AuthError> {
        let code = crypto::generate_code();
        account.email_verification_token = Some(crypto::hash_secret(&code)?);
        account.email_verification_token_expires_at = Some(self.code_expiry());
        Ok(code)
    }

    fn verification_body(&self, code: &str) -> String {
        format!(
            "Only one step to take full advantage of Networkpro.\n\nEnter this code to verify your email: {code}. The code will expire in {} minutes.",
            self.cfg.verification_token_ttl_minutes
        )
    }

    /// Delivery failures are logged and never fail the calling operation.
    async fn deliver(&self, to: &str, subject: &str, body: &str) {
        if let Err(e) = self.mailer.send_email(to, subject, body).await {
            warn!(%to, %subject, error = %e, "email_send_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::email::mock::MockEmailSender;
    use crate::auth::repository::mock::MockAuthRepository;

    struct Harness {
        repo: Arc<MockAuthRepository>,
        mailer: Arc<MockEmailSender>,
        svc: AuthService<MockAuthRepository>,
    }

    fn harness_with(mailer: MockEmailSender) -> Harness {
        let repo = Arc::new(MockAuthRepository::default());
        let mailer = Arc::new(mailer);
        let cfg = AuthConfig { jwt_secret: "test-secret".into(), jwt_ttl_hours: 1, verification_token_ttl_minutes: 1 };
        let svc = AuthService::new(repo.clone(), mailer.clone(), cfg);
        Harness { repo, mailer, svc }
    }

    fn harness() -> Harness { harness_with(MockEmailSender::default()) }

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput { email: email.into(), password: "Passw0rd!".into() }
    }

    async fn expire_verification(h: &Harness, email: &str) {
        let mut account = h.repo.find_by_email(email).await.unwrap().unwrap();
        account.email_verification_token_expires_at = Some(Utc::now() - Duration::minutes(5));
        h.repo.save(&account).await.unwrap();
    }

    #[tokio::test]
    async fn register_issues_token_and_verification_email() {
        let h = harness();
        let res = h.svc.register(register_input("ada@example.com")).await.unwrap();
        assert_eq!(res.message, "User registered successfully");
        assert_eq!(crypto::decode_token("test-secret", &res.token).unwrap().sub, "ada@example.com");

        let code = h.mailer.last_code("ada@example.com", VERIFICATION_SUBJECT).unwrap();
        let account = h.repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        let stored = account.email_verification_token.unwrap();
        assert_ne!(stored, code);
        assert!(crypto::verify_secret(&code, &stored));
        assert!(account.email_verification_token_expires_at.unwrap() > Utc::now());
        assert!(!account.email_verified);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_and_bad_input() {
        let h = harness();
        h.svc.register(register_input("ada@example.com")).await.unwrap();
        let dup = h.svc.register(register_input("ada@example.com")).await.unwrap_err();
        assert!(matches!(dup, AuthError::Conflict));
        assert!(dup.to_string().starts_with("An account with this email already exists"));

        let missing = h.svc.register(RegisterInput { email: "".into(), password: "x".into() }).await.unwrap_err();
        assert_eq!(missing.to_string(), "Email address is required");
        let no_pw = h.svc.register(RegisterInput { email: "b@example.com".into(), password: "".into() }).await.unwrap_err();
        assert_eq!(no_pw.to_string(), "Password is required");
    }

    #[tokio::test]
    async fn register_survives_email_failure() {
        let h = harness_with(MockEmailSender::failing());
        let res = h.svc.register(register_input("ada@example.com")).await;
        assert!(res.is_ok());
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_user_and_wrong_password() {
        let h = harness();
        h.svc.register(register_input("ada@example.com")).await.unwrap();

        let ok = h.svc.login(LoginInput { email: "ada@example.com".into(), password: "Passw0rd!".into() }).await.unwrap();
        assert_eq!(ok.message, "Authentication Succeeded");

        let unknown = h.svc.login(LoginInput { email: "bob@example.com".into(), password: "x".into() }).await.unwrap_err();
        assert_eq!(unknown.to_string(), "User not found. Please sign up first.");

        let wrong = h.svc.login(LoginInput { email: "ada@example.com".into(), password: "nope".into() }).await.unwrap_err();
        assert!(matches!(wrong, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn authenticate_resolves_token_owner() {
        let h = harness();
        let res = h.svc.register(register_input("ada@example.com")).await.unwrap();
        let user = h.svc.authenticate(&res.token).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert!(matches!(h.svc.authenticate("garbage").await, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn verification_succeeds_with_matching_unexpired_code() {
        let h = harness();
        h.svc.register(register_input("ada@example.com")).await.unwrap();
        let code = h.mailer.last_code("ada@example.com", VERIFICATION_SUBJECT).unwrap();

        h.svc.validate_email_verification_token("ada@example.com", &code).await.unwrap();
        let account = h.repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert!(account.email_verified);
        assert!(account.email_verification_token.is_none());
        assert!(account.email_verification_token_expires_at.is_none());

        // single use
        let again = h.svc.validate_email_verification_token("ada@example.com", &code).await.unwrap_err();
        assert_eq!(again.to_string(), "Email verification token failed.");
    }

    #[tokio::test]
    async fn verification_expired_differs_from_failed() {
        let h = harness();
        h.svc.register(register_input("ada@example.com")).await.unwrap();
        let code = h.mailer.last_code("ada@example.com", VERIFICATION_SUBJECT).unwrap();
        expire_verification(&h, "ada@example.com").await;

        let wrong_code = if code == "00000" { "11111" } else { "00000" };
        let failed = h.svc.validate_email_verification_token("ada@example.com", wrong_code).await.unwrap_err();
        assert!(matches!(failed, AuthError::TokenInvalid(_)));
        assert_eq!(failed.to_string(), "Email verification token failed.");

        let expired = h.svc.validate_email_verification_token("ada@example.com", &code).await.unwrap_err();
        assert!(matches!(expired, AuthError::TokenExpired(_)));
        assert_eq!(expired.to_string(), "Email verification token expired.");
    }

    #[tokio::test]
    async fn resend_verification_only_for_unverified() {
        let h = harness();
        h.svc.register(register_input("ada@example.com")).await.unwrap();
        expire_verification(&h, "ada@example.com").await;

        h.svc.send_email_verification_token("ada@example.com").await.unwrap();
        let second = h.mailer.last_code("ada@example.com", VERIFICATION_SUBJECT).unwrap();
        assert_eq!(h.mailer.sent().len(), 2);
        h.svc.validate_email_verification_token("ada@example.com", &second).await.unwrap();

        let err = h.svc.send_email_verification_token("ada@example.com").await.unwrap_err();
        assert_eq!(err.to_string(), "Email verification token expired, or email is already verified");
        let unknown = h.svc.send_email_verification_token("nobody@example.com").await;
        assert!(unknown.is_err());
    }

    #[tokio::test]
    async fn password_reset_flow() {
        let h = harness();
        h.svc.register(register_input("ada@example.com")).await.unwrap();

        let no_token = h.svc.reset_password("ada@example.com", "NewPass1", "12345").await.unwrap_err();
        assert_eq!(no_token.to_string(), "Password token expired.");

        h.svc.send_password_reset_token("ada@example.com").await.unwrap();
        let code = h.mailer.last_code("ada@example.com", PASSWORD_RESET_SUBJECT).unwrap();
        let wrong_code = if code == "00000" { "11111" } else { "00000" };
        let failed = h.svc.reset_password("ada@example.com", "NewPass1", wrong_code).await.unwrap_err();
        assert_eq!(failed.to_string(), "Password token failed.");

        h.svc.reset_password("ada@example.com", "NewPass1", &code).await.unwrap();
        let account = h.repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert!(account.password_reset_token.is_none());
        assert!(account.password_reset_token_expires_at.is_none());

        h.svc.login(LoginInput { email: "ada@example.com".into(), password: "NewPass1".into() }).await.unwrap();
        let old = h.svc.login(LoginInput { email: "ada@example.com".into(), password: "Passw0rd!".into() }).await;
        assert!(old.is_err());
    }

    #[tokio::test]
    async fn password_reset_expired_code() {
        let h = harness();
        h.svc.register(register_input("ada@example.com")).await.unwrap();
        h.svc.send_password_reset_token("ada@example.com").await.unwrap();
        let code = h.mailer.last_code("ada@example.com", PASSWORD_RESET_SUBJECT).unwrap();
        let mut account = h.repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        account.password_reset_token_expires_at = Some(Utc::now() - Duration::seconds(1));
        h.repo.save(&account).await.unwrap();

        let err = h.svc.reset_password("ada@example.com", "NewPass1", &code).await.unwrap_err();
        assert_eq!(err.to_string(), "Password token expired.");
    }

    #[tokio::test]
    async fn password_reset_unknown_user() {
        let h = harness();
        let err = h.svc.send_password_reset_token("nobody@example.com").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found.");
        let err = h.svc.reset_password("nobody@example.com", "x", "12345").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found.");
    }

    #[tokio::test]
    async fn ensure_account_is_idempotent() {
        let h = harness();
        assert!(h.svc.ensure_account("seed@example.com", "password").await.unwrap());
        assert!(!h.svc.ensure_account("seed@example.com", "password").await.unwrap());
        h.svc.login(LoginInput { email: "seed@example.com".into(), password: "password".into() }).await.unwrap();
    }
}
