//! HTTP peer clients
//!
//! User directory and enrollment authority over the resilient remote caller.
//! Each client owns its caller and therefore its own retry policy.

use kernel::id::{CourseId, UserId};
use platform::client::BearerToken;
use platform::remote::{RemoteCaller, RemoteResult};
use platform::transport::Transport;

use crate::domain::peers::{EnrollmentAuthority, StatusUpdate, UserDirectory, UserProfile};

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
pub struct HttpEnrollmentAuthority<T> {
    caller: RemoteCaller<T>,
}

impl<T> HttpEnrollmentAuthority<T>
where
    T: Transport + Sync,
{
    pub fn new(caller: RemoteCaller<T>) -> Self {
        Self { caller }
    }
}

impl<T> EnrollmentAuthority for HttpEnrollmentAuthority<T>
where
    T: Transport + Sync,
{
    async fn is_enrolled(
        &self,
        user_id: UserId,
        course_id: CourseId,
        bearer: &BearerToken,
    ) -> RemoteResult<bool> {
        self.caller
            .get_json(&format!("/api/enrollments/{user_id}/status/{course_id}"), bearer)
            .await
    }

    async fn update_status(&self, update: &StatusUpdate, bearer: &BearerToken) -> RemoteResult<()> {
        self.caller
            .post_json("/api/enrollments/status", update, bearer)
            .await
    }
}
