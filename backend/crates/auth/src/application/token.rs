//! Token Verifier
//!
//! Decodes and validates HMAC-signed bearer tokens issued by the identity
//! service and turns their claims into a [`Principal`]. No I/O, no state
//! beyond the decoding key.
//!
//! ## Claims read
//! - `sub`: subject (email)
//! - `id`: numeric user id, as a JSON number or a numeric string
//! - `roles`: role list; the first entry is the primary role
//! - `exp`: expiry, checked with the configured leeway

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::{Principal, Role};
use crate::error::TokenError;

/// Raw claim set. Optional fields are checked after signature validation so a
/// missing claim is reported as such rather than as a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// The identity service writes `id` as a string; numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdClaim {
    Number(i64),
    Text(String),
}

impl IdClaim {
    fn to_user_id(&self) -> Option<UserId> {
        let value = match self {
            IdClaim::Number(n) => *n,
            IdClaim::Text(s) => s.trim().parse().ok()?,
        };
        i32::try_from(value).ok().map(UserId::new)
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Key length decides the HMAC variant on the issuing side
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;

        Self {
            key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
        }
    }

    /// Signature and expiry check only
    pub fn validate(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    /// Validate and extract the caller's principal
    pub fn extract_claims(&self, token: &str) -> Result<Principal, TokenError> {
        let claims = self.decode(token)?;

        let role_code = claims
            .roles
            .as_ref()
            .and_then(|roles| roles.first())
            .ok_or(TokenError::MissingClaim("roles"))?;
        let role = Role::from_code(role_code).ok_or(TokenError::MissingClaim("roles"))?;

        let user_id = claims
            .id
            .as_ref()
            .and_then(IdClaim::to_user_id)
            .ok_or(TokenError::MissingClaim("id"))?;

        Ok(Principal {
            subject: claims.sub,
            user_id,
            role,
        })
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidSignature,
            })
    }
}
