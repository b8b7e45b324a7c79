//! Enrollment Listing Use Cases
//!
//! Listings resolve the subject (user or course) strictly, then enrich each
//! row with the other side best effort: a missing peer record renders as its
//! placeholder, an unreachable peer leaves the detail empty.

use auth::Authorized;
use kernel::id::{CourseId, UserId};
use std::sync::Arc;

use crate::application::resolve::{resolve_course, resolve_user};
use crate::domain::entities::Enrollment;
use crate::domain::peers::{CourseCatalog, CourseSummary, UserDirectory, UserProfile};
use crate::domain::repository::EnrollmentRepository;
use crate::error::{EnrollmentError, EnrollmentResult};

/// Enrollment of one user with the course details, if they could be fetched
#[derive(Debug, Clone)]
pub struct UserEnrollmentEntry {
    pub enrollment: Enrollment,
    pub course: Option<CourseSummary>,
}

/// Enrollment in one course with the learner's profile, if it could be fetched
#[derive(Debug, Clone)]
pub struct CourseEnrollmentEntry {
    pub enrollment: Enrollment,
    pub user: Option<UserProfile>,
}

pub struct EnrollmentListingUseCase<R, U, C>
where
    R: EnrollmentRepository,
    U: UserDirectory,
    C: CourseCatalog,
{
    repo: Arc<R>,
    users: Arc<U>,
    courses: Arc<C>,
}

impl<R, U, C> EnrollmentListingUseCase<R, U, C>
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

    /// ## Errors
    /// * `UserNotFound` / `DependencyUnavailable` - subject resolution
    /// * `NoUserEnrollments` - the user has no enrollment (404)
    pub async fn for_user(
        &self,
        user_id: UserId,
        caller: &Authorized,
    ) -> EnrollmentResult<Vec<UserEnrollmentEntry>> {
        resolve_user(self.users.as_ref(), user_id, &caller.token).await?;

        let enrollments = self.repo.list_by_user(user_id).await?;
        if enrollments.is_empty() {
            return Err(EnrollmentError::NoUserEnrollments(user_id));
        }

        let mut entries = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let course = self
                .courses
                .fetch_course(enrollment.course_id, &caller.token)
                .await
                .or_sentinel();
            if course.is_none() {
                tracing::warn!(course_id = %enrollment.course_id, "Listing without course details");
            }
            entries.push(UserEnrollmentEntry { enrollment, course });
        }

        Ok(entries)
    }

    /// ## Errors
    /// * `CourseNotFound` / `DependencyUnavailable` - subject resolution
    /// * `NoEnrollments` - nobody enrolled in the course (404)
    pub async fn for_course(
        &self,
        course_id: CourseId,
        caller: &Authorized,
    ) -> EnrollmentResult<Vec<CourseEnrollmentEntry>> {
        resolve_course(self.courses.as_ref(), course_id, &caller.token).await?;

        let enrollments = self.repo.list_by_course(course_id).await?;
        if enrollments.is_empty() {
            return Err(EnrollmentError::NoEnrollments(course_id));
        }

        let mut entries = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let user = self
                .users
                .fetch_user(enrollment.user_id, &caller.token)
                .await
                .or_sentinel();
            if user.is_none() {
                tracing::warn!(user_id = %enrollment.user_id, "Listing without user details");
            }
            entries.push(CourseEnrollmentEntry { enrollment, user });
        }

        Ok(entries)
    }
}
