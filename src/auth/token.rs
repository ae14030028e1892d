use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AuthError;
use crate::access::Role;

/// Tokens are valid for a week unless configured otherwise.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    /// Informational only; authorization re-reads the role from the database.
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// Signs and verifies session tokens with a process-wide HS256 secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, subject: Uuid, email: &str, role: Role) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, email, role, Utc::now())
    }

    /// Sign a token as if it had been issued at `issued_at`.
    pub fn issue_at(
        &self,
        subject: Uuid,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: subject,
            email: email.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: (expires_at - Utc::now()).num_seconds().max(0),
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    #[test]
    fn fresh_token_verifies() {
        let tokens = service("secret-a");
        let id = Uuid::new_v4();
        let issued = tokens.issue(id, "t@school.test", Role::Teacher).unwrap();
        let claims = tokens.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn six_day_old_token_is_accepted() {
        let tokens = service("secret-a");
        let issued_at = Utc::now() - Duration::days(6);
        let issued = tokens.issue_at(Uuid::new_v4(), "s@school.test", Role::Student, issued_at).unwrap();
        assert!(tokens.verify(&issued.token).is_ok());
    }

    #[test]
    fn eight_day_old_token_is_expired() {
        let tokens = service("secret-a");
        let issued_at = Utc::now() - Duration::days(8);
        let issued = tokens.issue_at(Uuid::new_v4(), "s@school.test", Role::Student, issued_at).unwrap();
        assert!(matches!(tokens.verify(&issued.token), Err(AuthError::TokenExpired)));
        assert_eq!(issued.expires_in, 0);
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let issued = service("secret-a").issue(Uuid::new_v4(), "a@school.test", Role::Admin).unwrap();
        assert!(matches!(service("secret-b").verify(&issued.token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_foreign_token_reports_invalid_not_expired() {
        let issued_at = Utc::now() - Duration::days(30);
        let issued = service("secret-a")
            .issue_at(Uuid::new_v4(), "a@school.test", Role::Admin, issued_at)
            .unwrap();
        assert!(matches!(service("secret-b").verify(&issued.token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(service("secret-a").verify("not.a.jwt"), Err(AuthError::InvalidToken)));
    }
}
