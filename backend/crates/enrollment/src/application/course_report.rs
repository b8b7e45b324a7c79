//! Course Report Use Case

use auth::Authorized;
use kernel::id::CourseId;
use std::sync::Arc;

use crate::application::resolve::resolve_course;
use crate::domain::entities::CourseReport;
use crate::domain::peers::CourseCatalog;
use crate::domain::repository::EnrollmentRepository;
use crate::error::{EnrollmentError, EnrollmentResult};

pub struct CourseReportUseCase<R, C>
where
    R: EnrollmentRepository,
    C: CourseCatalog,
{
    repo: Arc<R>,
    courses: Arc<C>,
}

impl<R, C> CourseReportUseCase<R, C>
where
    R: EnrollmentRepository + Sync,
    C: CourseCatalog + Sync,
{
    pub fn new(repo: Arc<R>, courses: Arc<C>) -> Self {
        Self { repo, courses }
    }

    pub async fn execute(
        &self,
        course_id: CourseId,
        caller: &Authorized,
    ) -> EnrollmentResult<CourseReport> {
        resolve_course(self.courses.as_ref(), course_id, &caller.token).await?;

        let enrollments = self.repo.list_by_course(course_id).await?;
        CourseReport::from_enrollments(course_id, &enrollments)
            .ok_or(EnrollmentError::NoEnrollments(course_id))
    }
}
