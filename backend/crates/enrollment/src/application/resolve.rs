//! Peer resolution shared by the write paths
//!
//! Every write resolves the user first, then the course. An outage stops the
//! request with 503; an affirmative "not found" stops it with 404.

use kernel::id::{CourseId, UserId};
use platform::client::BearerToken;
use platform::remote::{Dependency, RemoteResult};

use crate::domain::peers::{CourseCatalog, CourseSummary, UserDirectory, UserProfile};
use crate::error::{EnrollmentError, EnrollmentResult};

pub async fn resolve_user<U>(
    users: &U,
    user_id: UserId,
    token: &BearerToken,
) -> EnrollmentResult<UserProfile>
where
    U: UserDirectory + Sync,
{
    match users.fetch_user(user_id, token).await {
        RemoteResult::Success(user) => Ok(user),
        RemoteResult::NotFound => Err(EnrollmentError::UserNotFound(user_id)),
        RemoteResult::Unavailable => Err(EnrollmentError::DependencyUnavailable(Dependency::User)),
    }
}

pub async fn resolve_course<C>(
    courses: &C,
    course_id: CourseId,
    token: &BearerToken,
) -> EnrollmentResult<CourseSummary>
where
    C: CourseCatalog + Sync,
{
    match courses.fetch_course(course_id, token).await {
        RemoteResult::Success(course) => Ok(course),
        RemoteResult::NotFound => Err(EnrollmentError::CourseNotFound(course_id)),
        RemoteResult::Unavailable => {
            Err(EnrollmentError::DependencyUnavailable(Dependency::Course))
        }
    }
}
