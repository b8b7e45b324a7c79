//! HTTP peer clients
//!
//! User directory and course catalog over the resilient remote caller.

use kernel::id::{CourseId, UserId};
use platform::client::BearerToken;
use platform::remote::{RemoteCaller, RemoteResult};
use platform::transport::Transport;

use crate::domain::peers::{CourseCatalog, CourseSummary, UserDirectory, UserProfile};

#[derive(Clone)]
pub struct HttpUserDirectory<T> {
    caller: RemoteCaller<T>,
}

impl<T> HttpUserDirectory<T>
where
    T: Transport + Sync,
{
    pub fn new(caller: RemoteCaller<T>) -> Self {
        Self { caller }
    }
}

impl<T> UserDirectory for HttpUserDirectory<T>
where
    T: Transport + Sync,
{
    async fn fetch_user(&self, user_id: UserId, bearer: &BearerToken) -> RemoteResult<UserProfile> {
        self.caller
            .get_json(&format!("/api/users/{user_id}"), bearer)
            .await
    }
}

#[derive(Clone)]
pub struct HttpCourseCatalog<T> {
    caller: RemoteCaller<T>,
}

impl<T> HttpCourseCatalog<T>
where
    T: Transport + Sync,
{
    pub fn new(caller: RemoteCaller<T>) -> Self {
        Self { caller }
    }
}

impl<T> CourseCatalog for HttpCourseCatalog<T>
where
    T: Transport + Sync,
{
    async fn fetch_course(
        &self,
        course_id: CourseId,
        bearer: &BearerToken,
    ) -> RemoteResult<CourseSummary> {
        self.caller
            .get_json(&format!("/api/courses/{course_id}"), bearer)
            .await
    }
}
