//! Enrollment Error Types
//!
//! Enrollment-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{CourseId, UserId};
use platform::remote::Dependency;
use thiserror::Error;

/// Enrollment-specific result type alias
pub type EnrollmentResult<T> = Result<T, EnrollmentError>;

/// Enrollment-specific error variants
#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("User not found")]
    UserNotFound(UserId),

    #[error("Course not found")]
    CourseNotFound(CourseId),

    #[error("User already enrolled in this course.")]
    AlreadyEnrolled,

    /// Payment attempted without an enrollment
    #[error("You haven't enrolled in this course.")]
    NotEnrolled,

    #[error("Payment already completed for this course.")]
    AlreadyPaid,

    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    /// Status write for a pair with no enrollment. Treated as a server fault:
    /// the caller is expected to have checked enrollment first.
    #[error("Enrollment not found for user {user_id} in course {course_id}")]
    EnrollmentMissing { user_id: UserId, course_id: CourseId },

    #[error("No enrollments found for this course")]
    NoEnrollments(CourseId),

    #[error("No enrollments found for this user")]
    NoUserEnrollments(UserId),

    /// Peer service unreachable after retries
    #[error("{}", .0.unavailable_message())]
    DependencyUnavailable(Dependency),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EnrollmentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            EnrollmentError::Auth(e) => e.status_code(),
            EnrollmentError::UserNotFound(_)
            | EnrollmentError::CourseNotFound(_)
            | EnrollmentError::NotEnrolled
            | EnrollmentError::NoEnrollments(_)
            | EnrollmentError::NoUserEnrollments(_) => StatusCode::NOT_FOUND,
            EnrollmentError::AlreadyEnrolled | EnrollmentError::AlreadyPaid => StatusCode::CONFLICT,
            EnrollmentError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            EnrollmentError::DependencyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            EnrollmentError::EnrollmentMissing { .. }
            | EnrollmentError::Database(_)
            | EnrollmentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnrollmentError::Auth(e) => e.kind(),
            EnrollmentError::UserNotFound(_)
            | EnrollmentError::CourseNotFound(_)
            | EnrollmentError::NotEnrolled
            | EnrollmentError::NoEnrollments(_)
            | EnrollmentError::NoUserEnrollments(_) => ErrorKind::NotFound,
            EnrollmentError::AlreadyEnrolled | EnrollmentError::AlreadyPaid => ErrorKind::Conflict,
            EnrollmentError::InvalidStatus(_) => ErrorKind::BadRequest,
            EnrollmentError::DependencyUnavailable(_) => ErrorKind::ServiceUnavailable,
            EnrollmentError::EnrollmentMissing { .. }
            | EnrollmentError::Database(_)
            | EnrollmentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            EnrollmentError::Auth(e) => e.to_app_error(),
            EnrollmentError::UserNotFound(user_id) => {
                AppError::not_found(self.to_string()).with_detail(format!("User ID: {user_id}"))
            }
            EnrollmentError::CourseNotFound(course_id) => AppError::not_found(self.to_string())
                .with_detail(format!("Course ID: {course_id}")),
            EnrollmentError::DependencyUnavailable(dependency) => {
                AppError::service_unavailable(dependency.unavailable_message())
                    .with_detail(dependency.advisory())
            }
            EnrollmentError::EnrollmentMissing { .. } => AppError::internal("Enrollment not found"),
            EnrollmentError::Database(_) | EnrollmentError::Internal(_) => {
                AppError::internal("Failed to process enrollment request")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            EnrollmentError::Database(e) => {
                tracing::error!(error = %e, "Enrollment database error");
            }
            EnrollmentError::Internal(msg) => {
                tracing::error!(message = %msg, "Enrollment internal error");
            }
            EnrollmentError::EnrollmentMissing { user_id, course_id } => {
                tracing::error!(%user_id, %course_id, "Status update for missing enrollment");
            }
            EnrollmentError::DependencyUnavailable(dependency) => {
                tracing::error!(%dependency, "Dependency unavailable");
            }
            _ => {
                tracing::debug!(error = %self, "Enrollment error");
            }
        }
    }
}

impl From<EnrollmentError> for AppError {
    fn from(err: EnrollmentError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for EnrollmentError {
    fn into_response(self) -> Response {
        match self {
            EnrollmentError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}
