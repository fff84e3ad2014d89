use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::Error, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db::models::Document;

/// Lifetime of a session token
pub const SESSION_TTL_HOURS: i64 = 5;

/// Claims carried by a session token.
///
/// Every field of the login payload is signed into the token; `email`
/// identifies the subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub email: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiration (seconds since epoch)
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Document,
}

/// Signs and verifies HS256 session tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Sign a token for `email` that expires after the session lifetime
    pub fn issue(&self, email: &str, extra: Document) -> Result<String, Error> {
        self.issue_at(email, extra, Utc::now())
    }

    pub fn issue_at(&self, email: &str, mut extra: Document, issued_at: DateTime<Utc>) -> Result<String, Error> {
        // reserved names would otherwise be serialized twice
        for reserved in ["email", "iat", "exp"] {
            extra.remove(reserved);
        }

        let claims = SessionClaims {
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            extra,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Check signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, Error> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}
