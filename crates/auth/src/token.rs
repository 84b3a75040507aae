//! Bearer-token claims model and validation.
//!
//! Token *issuance* lives in the external identity subsystem; this module
//! only verifies what arrives on a request and hands the claims to the host
//! pipeline as an [`AuthenticatedIdentity`].

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::{AuthenticatedIdentity, Claim, UserId};

/// JWT claims model (transport-agnostic).
///
/// `sub` and the time window are the registered claims this design relies
/// on; everything else the identity subsystem issued rides along in `extra`
/// and is surfaced on the identity as string claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,

    /// Remaining claims, keyed by claim type. Only string-valued entries
    /// become identity claims.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JwtClaims {
    /// Build the per-request identity from these claims.
    pub fn to_identity(&self) -> AuthenticatedIdentity {
        let claims = self
            .extra
            .iter()
            .filter_map(|(claim_type, value)| {
                value
                    .as_str()
                    .map(|v| Claim::new(claim_type.clone(), v.to_owned()))
            })
            .collect();

        AuthenticatedIdentity::new(self.sub, claims)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate JWT claims against an injected `now`.
///
/// Note: this validates the *claims* only. Signature verification is the
/// job of a [`JwtValidator`] implementation.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a bearer token and returns its claims.
///
/// Implementations must be cheap to call per-request and safe to share
/// across requests.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// HS256 (shared-secret) validator.
pub struct Hs256JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let decoding_key = DecodingKey::from_secret(&secret);

        // Time-window checks run in `validate_claims` against the injected
        // `now`, not inside the JWT library.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key,
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &self.validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::CLAIM_LAST_PASSWORD_CHANGED;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn mint(secret: &str, claims: &JwtClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to encode jwt")
    }

    fn claims_valid_at(now: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::minutes(10),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn validates_and_returns_claims_within_window() {
        let now = Utc::now();
        let claims = claims_valid_at(now);
        let token = mint(SECRET, &claims);

        let validator = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        let validated = validator.validate(&token, now).unwrap();
        assert_eq!(validated, claims);
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let mut claims = claims_valid_at(now);
        claims.expires_at = now - Duration::seconds(1);
        let token = mint(SECRET, &claims);

        let validator = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        let err = validator.validate(&token, now).unwrap_err();
        assert!(matches!(
            err,
            TokenError::Claims(TokenValidationError::Expired)
        ));
    }

    #[test]
    fn rejects_token_issued_in_the_future() {
        let now = Utc::now();
        let mut claims = claims_valid_at(now);
        claims.issued_at = now + Duration::minutes(1);
        let token = mint(SECRET, &claims);

        let validator = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        let err = validator.validate(&token, now).unwrap_err();
        assert!(matches!(
            err,
            TokenError::Claims(TokenValidationError::NotYetValid)
        ));
    }

    #[test]
    fn rejects_inverted_time_window() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now,
            expires_at: now,
            extra: serde_json::Map::new(),
        };

        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let now = Utc::now();
        let token = mint("another-secret", &claims_valid_at(now));

        let validator = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        assert!(matches!(
            validator.validate(&token, now),
            Err(TokenError::Jwt(_))
        ));
    }

    #[test]
    fn string_claims_flow_onto_the_identity() {
        let now = Utc::now();
        let mut claims = claims_valid_at(now);
        claims.extra.insert(
            CLAIM_LAST_PASSWORD_CHANGED.to_string(),
            serde_json::Value::String("2026-01-01T00:00:00Z".to_string()),
        );
        claims
            .extra
            .insert("login_count".to_string(), serde_json::Value::from(17));

        let identity = claims.to_identity();
        assert_eq!(identity.user_id(), claims.sub);
        assert_eq!(
            identity.claim(CLAIM_LAST_PASSWORD_CHANGED),
            Some("2026-01-01T00:00:00Z")
        );
        // Non-string claim values are not representable as identity claims.
        assert_eq!(identity.claim("login_count"), None);
    }
}
