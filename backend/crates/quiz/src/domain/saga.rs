//! Submission saga stages
//!
//! ```text
//! Start -> UserVerified -> QuizResolved -> EnrollmentConfirmed
//!       -> DuplicateChecked -> Persisted -> StatusPropagated | PropagationFailed
//! ```
//!
//! A failure before `Persisted` leaves no side effect. Both propagation
//! stages are terminal successes for the caller.

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SagaStage {
    Start,
    UserVerified,
    QuizResolved,
    EnrollmentConfirmed,
    DuplicateChecked,
    Persisted,
    StatusPropagated,
    PropagationFailed,
}
