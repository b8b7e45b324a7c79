//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{Enrollment, EnrollmentStatus, NewEnrollment, PaidStatus};
use crate::error::EnrollmentResult;
use kernel::id::{CourseId, EnrollmentId, UserId};

/// Enrollment repository trait
#[trait_variant::make(EnrollmentRepository: Send)]
pub trait LocalEnrollmentRepository {
    async fn find(&self, user_id: UserId, course_id: CourseId)
    -> EnrollmentResult<Option<Enrollment>>;

    /// True only for an existing record with PAID status
    async fn exists_paid(&self, user_id: UserId, course_id: CourseId) -> EnrollmentResult<bool>;

    /// Insert a new record; a duplicate surfaces as `AlreadyEnrolled`
    async fn insert(&self, enrollment: &NewEnrollment) -> EnrollmentResult<Enrollment>;

    /// Unconditional overwrite
    async fn set_status(
        &self,
        enrollment_id: EnrollmentId,
        status: EnrollmentStatus,
    ) -> EnrollmentResult<()>;

    async fn set_paid_status(
        &self,
        enrollment_id: EnrollmentId,
        paid_status: PaidStatus,
    ) -> EnrollmentResult<()>;

    /// Oldest first
    async fn list_by_course(&self, course_id: CourseId) -> EnrollmentResult<Vec<Enrollment>>;

    /// Oldest first
    async fn list_by_user(&self, user_id: UserId) -> EnrollmentResult<Vec<Enrollment>>;
}
