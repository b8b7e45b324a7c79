//! Peer service contracts
//!
//! What the orchestrator needs from the user and enrollment services. Every
//! call forwards the caller's credential and yields a [`RemoteResult`].

use kernel::id::{CourseId, UserId};
use platform::client::BearerToken;
use platform::remote::{RemoteResult, Sentinel};
use serde::{Deserialize, Serialize};

use crate::domain::services::Outcome;

/// User directory record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl Sentinel for UserProfile {
    fn sentinel() -> Self {
        Self {
            id: UserId::new(0),
            name: "UNKNOWN".into(),
            email: "N/A".into(),
            role: "N/A".into(),
        }
    }
}

/// Body of the enrollment status write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: &'static str,
}

impl StatusUpdate {
    pub fn new(user_id: UserId, course_id: CourseId, outcome: Outcome) -> Self {
        Self {
            user_id,
            course_id,
            status: outcome.enrollment_status(),
        }
    }
}

#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    async fn fetch_user(&self, user_id: UserId, bearer: &BearerToken) -> RemoteResult<UserProfile>;
}

#[trait_variant::make(EnrollmentAuthority: Send)]
pub trait LocalEnrollmentAuthority {
    /// Enrolled and paid
    async fn is_enrolled(
        &self,
        user_id: UserId,
        course_id: CourseId,
        bearer: &BearerToken,
    ) -> RemoteResult<bool>;

    async fn update_status(&self, update: &StatusUpdate, bearer: &BearerToken) -> RemoteResult<()>;
}
