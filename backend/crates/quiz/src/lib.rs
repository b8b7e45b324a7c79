//! Quiz (Quiz Submission) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, scoring, repository traits, peer contracts
//! - `application/` - Use cases
//! - `infra/` - Database and HTTP peer implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Submission saga
//! 1. Verify the caller with the user service
//! 2. Resolve the quiz locally
//! 3. Confirm a paid enrollment with the enrollment service
//! 4. Reject a second submission for the same quiz
//! 5. Validate and persist answers in one transaction
//! 6. Grade
//! 7. Push PASSED/FAILED to the enrollment service, best effort
//!
//! Trainers author the quiz of a course (`/create`, `/questions`); learners
//! read it without option correctness (`/get/{courseId}`).
//!
//! Peer outages surface as 503 with a message naming the service; a peer
//! that reports "not found" surfaces as 404.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::QuizConfig;
pub use error::{QuizError, QuizResult};
pub use infra::peers::{HttpEnrollmentAuthority, HttpUserDirectory};
pub use infra::postgres::PgQuizRepository;
pub use presentation::handlers::QuizAppState;
pub use presentation::router::quiz_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
