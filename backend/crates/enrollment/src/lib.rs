//! Enrollment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Enrollment entity, course report, repository and peer traits
//! - `application/` - Use cases
//! - `infra/` - Database and HTTP peer implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Status gate
//! The quiz service asks `GET /{userId}/status/{courseId}` before accepting a
//! submission (true only for a paid enrollment) and reports the outcome via
//! `POST /status` afterwards.
//!
//! Listings (`/user/{userId}`, `/course/{courseId}`) enrich each row from the
//! peer services best effort; an outage blanks the detail, never the row.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{EnrollmentError, EnrollmentResult};
pub use infra::peers::{HttpCourseCatalog, HttpUserDirectory};
pub use infra::postgres::PgEnrollmentRepository;
pub use presentation::handlers::EnrollmentAppState;
pub use presentation::router::enrollment_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
