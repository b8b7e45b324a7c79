//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CourseId, EnrollmentId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::{CourseEnrollmentEntry, UserEnrollmentEntry};
use crate::domain::entities::{CourseReport, Enrollment, EnrollmentStatus, PaidStatus};
use crate::domain::peers::{CourseSummary, UserProfile};

/// Request for POST /api/enrollments/enroll and /pay
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub course_id: CourseId,
}

/// Request for POST /api/enrollments/status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: String,
}

/// Generic message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Enrollment as returned by the write endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub success: bool,
    pub message: String,
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,
    pub paid_status: PaidStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl EnrollmentResponse {
    pub fn new(message: impl Into<String>, enrollment: Enrollment) -> Self {
        Self {
            success: true,
            message: message.into(),
            enrollment_id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            status: enrollment.status,
            paid_status: enrollment.paid_status,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

/// Response for GET /api/enrollments/course/{courseId}/report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReportResponse {
    pub course_id: CourseId,
    pub total_enrollments: u64,
    pub passed: u64,
    pub failed: u64,
    pub active: u64,
    pub paid_enrollments: u64,
    pub pass_rate: f64,
}

impl From<CourseReport> for CourseReportResponse {
    fn from(report: CourseReport) -> Self {
        Self {
            course_id: report.course_id,
            total_enrollments: report.total,
            passed: report.passed,
            failed: report.failed,
            active: report.active,
            paid_enrollments: report.paid,
            pass_rate: report.pass_rate,
        }
    }
}

/// Peer record embedded in a listing row, or a note when the peer was down
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PeerDetail<T> {
    Known(T),
    Unavailable(&'static str),
}

impl<T> PeerDetail<T> {
    fn from_lookup(detail: Option<T>, note: &'static str) -> Self {
        detail.map_or(PeerDetail::Unavailable(note), PeerDetail::Known)
    }
}

/// Row of GET /api/enrollments/user/{userId}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEnrollmentResponse {
    pub enrollment_id: EnrollmentId,
    pub course: PeerDetail<CourseSummary>,
    pub status: EnrollmentStatus,
    pub payment_status: PaidStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl From<UserEnrollmentEntry> for UserEnrollmentResponse {
    fn from(entry: UserEnrollmentEntry) -> Self {
        let UserEnrollmentEntry { enrollment, course } = entry;
        Self {
            enrollment_id: enrollment.id,
            course: PeerDetail::from_lookup(course, "Course details not available"),
            status: enrollment.status,
            payment_status: enrollment.paid_status,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

/// Row of GET /api/enrollments/course/{courseId}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollmentResponse {
    pub enrollment_id: EnrollmentId,
    pub user: PeerDetail<UserProfile>,
    pub status: EnrollmentStatus,
    pub payment_status: PaidStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl From<CourseEnrollmentEntry> for CourseEnrollmentResponse {
    fn from(entry: CourseEnrollmentEntry) -> Self {
        let CourseEnrollmentEntry { enrollment, user } = entry;
        Self {
            enrollment_id: enrollment.id,
            user: PeerDetail::from_lookup(user, "User details not available"),
            status: enrollment.status,
            payment_status: enrollment.paid_status,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}
