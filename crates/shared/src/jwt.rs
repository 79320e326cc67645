//! Signed bearer tokens for staff logins.
//!
//! Tokens are HS256 and carry the identity ID, email and role. There is no
//! refresh flow; a client logs in again once `expires_in` has passed.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;
use crate::config::JwtSettings;

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret.
    pub secret: String,
    /// Lifetime of an issued token, in minutes.
    pub access_token_expires_minutes: i64,
}

impl From<&JwtSettings> for JwtConfig {
    /// Whole minutes; a lifetime under a minute is rounded up to one.
    fn from(settings: &JwtSettings) -> Self {
        let minutes = settings.access_token_expiry_secs.div_ceil(60).max(1);
        Self {
            secret: settings.secret.clone(),
            access_token_expires_minutes: i64::try_from(minutes).unwrap_or(i64::MAX),
        }
    }
}

/// Why a token could not be issued or accepted.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Signing the claims failed.
    #[error("could not sign token: {0}")]
    Signing(String),

    /// Bad signature, malformed token or unexpected claims.
    #[error("token rejected: {0}")]
    Invalid(String),

    /// Past its `exp`.
    #[error("token has expired")]
    Expired,
}

/// Issues and checks login tokens.
#[derive(Clone)]
pub struct JwtService {
    expires_minutes: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expires_minutes", &self.expires_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Builds the keys from the shared secret.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        Self {
            expires_minutes: config.access_token_expires_minutes,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issues a token for a logged-in identity.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Signing` if encoding fails.
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(
            user_id,
            email,
            role,
            Utc::now() + Duration::minutes(self.expires_minutes),
        );
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    /// Checks the signature and expiry and returns the claims.
    ///
    /// # Errors
    ///
    /// `JwtError::Expired` for an outdated token, `JwtError::Invalid` for
    /// anything else.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(JwtError::Expired),
            Err(e) => Err(JwtError::Invalid(e.to_string())),
        }
    }

    /// Token lifetime in seconds, reported to clients as `expires_in`.
    #[must_use]
    pub const fn access_token_expires_in(&self) -> i64 {
        self.expires_minutes * 60
    }
}
