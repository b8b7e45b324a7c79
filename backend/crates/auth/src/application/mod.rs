//! Application Layer
//!
//! Token verification and the authorization gate.

pub mod config;
pub mod gate;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use gate::{AuthorizationGate, Authorized};
pub use token::TokenVerifier;
