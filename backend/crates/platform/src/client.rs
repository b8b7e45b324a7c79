//! Client credential utilities
//!
//! Extracts the caller's bearer credential from request headers so it can be
//! verified locally and forwarded unchanged to peer services.

use axum::http::{HeaderMap, header};
use std::fmt;

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer credential presented by the caller.
///
/// The raw token is never printed; `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Error when reading the caller's credential
#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialError {
    #[error("Authorization header is not valid ASCII")]
    MalformedHeader,
}

/// Extract the bearer credential from request headers
///
/// ## Returns
/// * `Ok(Some(token))` - `Authorization: Bearer <token>` present
/// * `Ok(None)` - header missing, empty, or using another scheme
/// * `Err(CredentialError)` - header present but not readable
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<BearerToken>, CredentialError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| CredentialError::MalformedHeader)?;

    Ok(value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(BearerToken::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        let token = extract_bearer_token(&headers).unwrap().unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_none() {
        let headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).unwrap().is_none());
    }

    #[test]
    fn test_other_scheme_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(extract_bearer_token(&headers).unwrap().is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(extract_bearer_token(&headers).unwrap().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = BearerToken::new("t0k3n");
        assert_eq!(format!("{token:?}"), "BearerToken(***)");
    }
}
