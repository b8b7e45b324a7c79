//! Auth (Authentication and Authorization) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Roles, principal, operation capability table
//! - `application/` - Token verifier, authorization gate, config
//! - `presentation/` - per-route operation guard middleware
//!
//! ## Flow
//! 1. [`require_operation`] reads `Authorization: Bearer <token>` before any
//!    handler extractor runs
//! 2. [`AuthorizationGate::authorize`] verifies the token and checks the
//!    primary role against [`Operation::allowed_roles`]
//! 3. The handler receives an [`Authorized`] caller (via `Extension`) carrying
//!    the credential for delegation to peer services
//!
//! Tokens are issued by the identity service; this crate never mints them.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthorizationGate, Authorized, TokenVerifier};
pub use domain::{Operation, Principal, Role, RoleSet};
pub use error::{AuthError, AuthResult, TokenError};
pub use presentation::middleware::{OperationGuard, require_operation};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
