//! Application Configuration
//!
//! Configuration for the quiz application layer.

use crate::domain::services::PASS_THRESHOLD;

/// Quiz application configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Minimum percentage (inclusive) for a pass
    pub pass_threshold: f64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            pass_threshold: PASS_THRESHOLD,
        }
    }
}

impl QuizConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }
}
