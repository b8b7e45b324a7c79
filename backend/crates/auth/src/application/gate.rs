//! Authorization Gate
//!
//! Runs the token verifier, then checks the principal's primary role against
//! the operation's allowed set. Nothing downstream runs on failure.

use platform::client::BearerToken;
use std::sync::Arc;

use crate::application::token::TokenVerifier;
use crate::domain::{Operation, Principal};
use crate::error::{AuthError, AuthResult};

/// Caller that passed the gate. The credential is kept so it can be forwarded
/// unchanged to peer services.
#[derive(Debug, Clone)]
pub struct Authorized {
    pub principal: Principal,
    pub token: BearerToken,
}

#[derive(Clone)]
pub struct AuthorizationGate {
    verifier: Arc<TokenVerifier>,
}

impl AuthorizationGate {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// ## Errors
    /// * `MissingCredential` - no bearer token (401)
    /// * `Token(_)` - token rejected by the verifier (401)
    /// * `RoleMismatch` - primary role not allowed for `operation` (403)
    pub fn authorize(
        &self,
        operation: Operation,
        token: Option<BearerToken>,
    ) -> AuthResult<Authorized> {
        let token = token.ok_or(AuthError::MissingCredential)?;
        let principal = self.verifier.extract_claims(token.as_str())?;

        if !operation.permits(principal.role) {
            return Err(AuthError::RoleMismatch {
                operation,
                role: principal.role,
            });
        }

        tracing::debug!(
            %operation,
            user_id = %principal.user_id,
            role = %principal.role,
            "Caller authorized"
        );

        Ok(Authorized { principal, token })
    }
}
