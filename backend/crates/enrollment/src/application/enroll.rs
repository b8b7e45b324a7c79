//! Enroll and Pay Use Cases
//!
//! Both act on the caller's own enrollment. A new enrollment starts ENROLLED
//! and UNPAID; quizzes unlock once it is paid.

use auth::Authorized;
use kernel::id::CourseId;
use std::sync::Arc;

use crate::application::resolve::{resolve_course, resolve_user};
use crate::domain::entities::{Enrollment, NewEnrollment, PaidStatus};
use crate::domain::peers::{CourseCatalog, UserDirectory};
use crate::domain::repository::EnrollmentRepository;
use crate::error::{EnrollmentError, EnrollmentResult};

/// Enroll Use Case
pub struct EnrollUseCase<R, U, C>
where
    R: EnrollmentRepository,
    U: UserDirectory,
    C: CourseCatalog,
{
    repo: Arc<R>,
    users: Arc<U>,
    courses: Arc<C>,
}

impl<R, U, C> EnrollUseCase<R, U, C>
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
        course_id: CourseId,
        caller: &Authorized,
    ) -> EnrollmentResult<Enrollment> {
        let user_id = caller.principal.user_id;

        resolve_user(self.users.as_ref(), user_id, &caller.token).await?;
        resolve_course(self.courses.as_ref(), course_id, &caller.token).await?;

        if self.repo.find(user_id, course_id).await?.is_some() {
            return Err(EnrollmentError::AlreadyEnrolled);
        }

        let enrollment = self
            .repo
            .insert(&NewEnrollment::new(user_id, course_id))
            .await?;

        tracing::info!(
            enrollment_id = %enrollment.id,
            %user_id,
            %course_id,
            "Learner enrolled"
        );

        Ok(enrollment)
    }
}

/// Pay Use Case
pub struct PayUseCase<R, U, C>
where
    R: EnrollmentRepository,
    U: UserDirectory,
    C: CourseCatalog,
{
    repo: Arc<R>,
    users: Arc<U>,
    courses: Arc<C>,
}

impl<R, U, C> PayUseCase<R, U, C>
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
        course_id: CourseId,
        caller: &Authorized,
    ) -> EnrollmentResult<Enrollment> {
        let user_id = caller.principal.user_id;

        resolve_user(self.users.as_ref(), user_id, &caller.token).await?;
        resolve_course(self.courses.as_ref(), course_id, &caller.token).await?;

        let mut enrollment = self
            .repo
            .find(user_id, course_id)
            .await?
            .ok_or(EnrollmentError::NotEnrolled)?;

        if enrollment.is_paid() {
            return Err(EnrollmentError::AlreadyPaid);
        }

        self.repo
            .set_paid_status(enrollment.id, PaidStatus::Paid)
            .await?;
        enrollment.paid_status = PaidStatus::Paid;

        tracing::info!(
            enrollment_id = %enrollment.id,
            %user_id,
            %course_id,
            "Enrollment paid"
        );

        Ok(enrollment)
    }
}
