//! Application Configuration
//!
//! Configuration for token verification.

/// Fixed secret used when no `JWT_SECRET` is configured in development.
const DEV_SECRET: &str = "dev-mode-secret-not-for-production-use-0123456789";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret the identity service signs tokens with
    pub jwt_secret: Vec<u8>,
    /// Clock skew tolerated on `exp`, in seconds
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            leeway_secs: 0,
        }
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Create config for development (fixed secret, small leeway)
    pub fn development() -> Self {
        Self {
            jwt_secret: DEV_SECRET.as_bytes().to_vec(),
            leeway_secs: 5,
        }
    }

    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}
