//! Hashing, one-time codes and JWT helpers.

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Digits in an email verification or password reset code.
pub const CODE_LENGTH: usize = 5;

pub fn hash_secret(secret: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// False for a mismatch and for a malformed hash.
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Random numeric code, e.g. `"04817"`.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    (0..CODE_LENGTH).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn issue_token(secret: &str, email: &str, ttl_hours: i64) -> Result<String, AuthError> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::hours(ttl_hours)).timestamp() as usize,
    };
    encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Verify signature and expiry (HS256).
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_secret_verifies_only_original() {
        let hash = hash_secret("12345").unwrap();
        assert_ne!(hash, "12345");
        assert!(verify_secret("12345", &hash));
        assert!(!verify_secret("54321", &hash));
        assert!(!verify_secret("12345", "not-a-hash"));
    }

    #[test]
    fn codes_are_five_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn token_round_trip_and_wrong_secret() {
        let token = issue_token("secret", "a@b.com", 1).unwrap();
        assert_eq!(decode_token("secret", &token).unwrap().sub, "a@b.com");
        assert!(matches!(decode_token("other", &token), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn expired_token_rejected() {
        let token = issue_token("secret", "a@b.com", -2).unwrap();
        assert!(decode_token("secret", &token).is_err());
    }
}
