//! Operation guard middleware
//!
//! Attached per route with `route_layer`, so the gate runs before any
//! handler extractor touches the path or body. An unauthenticated caller
//! always sees 401, never a decoding error.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use platform::client::extract_bearer_token;
use std::sync::Arc;

use crate::application::AuthorizationGate;
use crate::domain::Operation;
use crate::error::AuthError;

/// Middleware state: the gate and the operation the route performs
#[derive(Clone)]
pub struct OperationGuard {
    gate: Arc<AuthorizationGate>,
    operation: Operation,
}

impl OperationGuard {
    pub fn new(gate: Arc<AuthorizationGate>, operation: Operation) -> Self {
        Self { gate, operation }
    }
}

/// Authorize the request for the guarded operation.
///
/// On success the [`Authorized`](crate::Authorized) caller is inserted into
/// request extensions for the handler to pick up with `Extension`.
pub async fn require_operation(
    State(guard): State<OperationGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(request.headers())?;
    let authorized = guard.gate.authorize(guard.operation, token)?;

    request.extensions_mut().insert(authorized);
    Ok(next.run(request).await)
}
