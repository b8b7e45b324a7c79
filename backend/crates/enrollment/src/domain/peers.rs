//! Peer service contracts
//!
//! User and course lookups. Every call forwards the caller's credential and
//! yields a [`RemoteResult`].

use kernel::id::{CourseId, UserId};
use platform::client::BearerToken;
use platform::remote::{RemoteResult, Sentinel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

/// Course catalog record. Only the id is relied on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub trainer_id: Option<UserId>,
}

impl Sentinel for CourseSummary {
    fn sentinel() -> Self {
        Self {
            id: CourseId::new(0),
            title: "UNKNOWN".into(),
            description: "N/A".into(),
            status: None,
            trainer_id: None,
        }
    }
}

#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    async fn fetch_user(&self, user_id: UserId, bearer: &BearerToken) -> RemoteResult<UserProfile>;
}

#[trait_variant::make(CourseCatalog: Send)]
pub trait LocalCourseCatalog {
    async fn fetch_course(
        &self,
        course_id: CourseId,
        bearer: &BearerToken,
    ) -> RemoteResult<CourseSummary>;
}
