//! Quiz Error Types
//!
//! Quiz-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{CourseId, OptionId, QuestionId, UserId};
use platform::remote::Dependency;
use thiserror::Error;

/// Quiz-specific result type alias
pub type QuizResult<T> = Result<T, QuizError>;

/// Quiz-specific error variants
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// User directory affirmatively reported the caller missing
    #[error("User not found")]
    UserNotFound(UserId),

    #[error("Quiz not found")]
    QuizNotFound,

    /// No quiz has been created for the course yet
    #[error("Quiz not found for course ID: {0}")]
    NoQuizForCourse(CourseId),

    /// Course missing from the catalog table when authoring a quiz
    #[error("Course not found")]
    CourseNotFound(CourseId),

    #[error("Quiz already exists for this course")]
    QuizAlreadyExists,

    #[error("Quiz title must not be empty")]
    EmptyTitle,

    #[error("You are not enrolled in this course")]
    NotEnrolled,

    #[error("You have already submitted this quiz")]
    DuplicateSubmission,

    /// Answer references a question outside the quiz
    #[error("Question not found")]
    QuestionNotFound(QuestionId),

    /// Answer references an option outside its question
    #[error("Option not found")]
    OptionNotFound(OptionId),

    #[error("No quiz submissions found for this user")]
    NoSubmissions,

    #[error("Quiz ID in path does not match request body")]
    QuizIdMismatch,

    /// Peer service unreachable after retries
    #[error("{}", .0.unavailable_message())]
    DependencyUnavailable(Dependency),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl QuizError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuizError::Auth(e) => e.status_code(),
            QuizError::UserNotFound(_)
            | QuizError::QuizNotFound
            | QuizError::NoQuizForCourse(_)
            | QuizError::CourseNotFound(_)
            | QuizError::NotEnrolled
            | QuizError::QuestionNotFound(_)
            | QuizError::OptionNotFound(_)
            | QuizError::NoSubmissions => StatusCode::NOT_FOUND,
            QuizError::DuplicateSubmission | QuizError::QuizAlreadyExists => StatusCode::CONFLICT,
            QuizError::QuizIdMismatch | QuizError::EmptyTitle => StatusCode::BAD_REQUEST,
            QuizError::DependencyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            QuizError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::Auth(e) => e.kind(),
            QuizError::UserNotFound(_)
            | QuizError::QuizNotFound
            | QuizError::NoQuizForCourse(_)
            | QuizError::CourseNotFound(_)
            | QuizError::NotEnrolled
            | QuizError::QuestionNotFound(_)
            | QuizError::OptionNotFound(_)
            | QuizError::NoSubmissions => ErrorKind::NotFound,
            QuizError::DuplicateSubmission | QuizError::QuizAlreadyExists => ErrorKind::Conflict,
            QuizError::QuizIdMismatch | QuizError::EmptyTitle => ErrorKind::BadRequest,
            QuizError::DependencyUnavailable(_) => ErrorKind::ServiceUnavailable,
            QuizError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            QuizError::Auth(e) => e.to_app_error(),
            QuizError::UserNotFound(user_id) => {
                AppError::not_found(self.to_string()).with_detail(format!("User ID: {user_id}"))
            }
            QuizError::DependencyUnavailable(dependency) => {
                AppError::service_unavailable(dependency.unavailable_message())
                    .with_detail(dependency.advisory())
            }
            QuizError::CourseNotFound(course_id) => {
                AppError::not_found(self.to_string()).with_detail(format!("Course ID: {course_id}"))
            }
            // Storage details stay in the logs
            QuizError::Database(_) => {
                AppError::internal("Failed to process quiz request")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuizError::Database(e) => {
                tracing::error!(error = %e, "Quiz database error");
            }
            QuizError::DependencyUnavailable(dependency) => {
                tracing::error!(%dependency, "Dependency unavailable");
            }
            QuizError::DuplicateSubmission => {
                tracing::warn!("Duplicate quiz submission rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Quiz error");
            }
        }
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        match self {
            QuizError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}
