//! Enrollment Status Gate
//!
//! The read side answers "may this user take quizzes for this course?" and
//! is consulted by the quiz service before every submission. The write side
//! records a quiz outcome. Writes overwrite unconditionally: a PASSED
//! enrollment can become FAILED.

use auth::Authorized;
use kernel::id::{CourseId, UserId};
use std::sync::Arc;

use crate::application::resolve::{resolve_course, resolve_user};
use crate::domain::entities::{Enrollment, EnrollmentStatus};
use crate::domain::peers::{CourseCatalog, UserDirectory};
use crate::domain::repository::EnrollmentRepository;
use crate::error::{EnrollmentError, EnrollmentResult};

/// Check Enrollment Use Case
pub struct CheckEnrollmentUseCase<R>
where
    R: EnrollmentRepository,
{
    repo: Arc<R>,
}

impl<R> CheckEnrollmentUseCase<R>
where
    R: EnrollmentRepository + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// True only when an enrollment exists and is paid. Completion status is
    /// not considered.
    pub async fn execute(&self, user_id: UserId, course_id: CourseId) -> EnrollmentResult<bool> {
        let paid = self.repo.exists_paid(user_id, course_id).await?;
        tracing::debug!(%user_id, %course_id, paid, "Enrollment check");
        Ok(paid)
    }
}

/// Input DTO for status update
#[derive(Debug, Clone)]
pub struct UpdateStatusInput {
    pub user_id: UserId,
    pub course_id: CourseId,
    /// Raw status text, validated here so the rejection names the value
    pub status: String,
}

/// Update Status Use Case
pub struct UpdateStatusUseCase<R, U, C>
where
    R: EnrollmentRepository,
    U: UserDirectory,
    C: CourseCatalog,
{
    repo: Arc<R>,
    users: Arc<U>,
    courses: Arc<C>,
}

impl<R, U, C> UpdateStatusUseCase<R, U, C>
where
    R: EnrollmentRepository + Sync,
    U: UserDirectory + Sync,
    C: CourseCatalog + Sync,
{
    pub fn new(repo: Arc<R>, users: Arc<U>, courses: Arc<C>) -> Self {
        Self {
            repo,
            users,
            courses,
        }
    }

    pub async fn execute(
        &self,
        input: UpdateStatusInput,
        caller: &Authorized,
    ) -> EnrollmentResult<Enrollment> {
        let status = EnrollmentStatus::from_code(&input.status)
            .ok_or_else(|| EnrollmentError::InvalidStatus(input.status.clone()))?;

        resolve_user(self.users.as_ref(), input.user_id, &caller.token).await?;
        resolve_course(self.courses.as_ref(), input.course_id, &caller.token).await?;

        let mut enrollment = self
            .repo
            .find(input.user_id, input.course_id)
            .await?
            .ok_or(EnrollmentError::EnrollmentMissing {
                user_id: input.user_id,
                course_id: input.course_id,
            })?;

        let previous = enrollment.status;
        self.repo.set_status(enrollment.id, status).await?;
        enrollment.status = status;

        tracing::info!(
            user_id = %input.user_id,
            course_id = %input.course_id,
            %previous,
            %status,
            updated_by = %caller.principal.user_id,
            "Enrollment status updated"
        );

        Ok(enrollment)
    }
}
