//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::{Operation, Role};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Token verification failures. Any decode failure other than expiry is
/// reported as `InvalidSignature`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token missing '{0}' claim")]
    MissingClaim(&'static str),
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer credential on the request
    #[error("Authentication required")]
    MissingCredential,

    /// Authorization header present but unreadable
    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Valid token whose primary role is not allowed for the operation
    #[error("Access denied")]
    RoleMismatch { operation: Operation, role: Role },
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential | AuthError::MalformedHeader | AuthError::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::RoleMismatch { .. } => StatusCode::FORBIDDEN,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredential | AuthError::MalformedHeader | AuthError::Token(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::RoleMismatch { .. } => ErrorKind::Forbidden,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Token(TokenError::InvalidSignature) => {
                tracing::warn!("Rejected token with invalid signature");
            }
            AuthError::Token(TokenError::MissingClaim(claim)) => {
                tracing::warn!(claim, "Rejected token with missing claim");
            }
            AuthError::RoleMismatch { operation, role } => {
                let allowed: Vec<_> = operation.allowed_roles().iter().map(|r| r.code()).collect();
                tracing::warn!(%operation, %role, ?allowed, "Role not permitted for operation");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.to_app_error()
    }
}

impl From<platform::client::CredentialError> for AuthError {
    fn from(err: platform::client::CredentialError) -> Self {
        match err {
            platform::client::CredentialError::MalformedHeader => AuthError::MalformedHeader,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingCredential.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::from(TokenError::Expired).status_code(), StatusCode::UNAUTHORIZED);
        let mismatch = AuthError::RoleMismatch {
            operation: Operation::CourseReport,
            role: Role::Learner,
        };
        assert_eq!(mismatch.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(mismatch.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_token_error_message() {
        let err = AuthError::from(TokenError::MissingClaim("id"));
        assert_eq!(err.to_string(), "Token missing 'id' claim");
        assert_eq!(err.to_app_error().status_code(), 401);
    }
}
