//! Domain Entities
//!
//! Enrollment records and the course report derived from them.

use chrono::{DateTime, Utc};
use derive_more::Display;
use kernel::id::{CourseId, EnrollmentId, UserId};
use serde::Serialize;

/// Learning progress of an enrollment. Any status may be overwritten by any
/// other; there is no transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[display("ENROLLED")]
    Enrolled,
    #[display("PASSED")]
    Passed,
    #[display("FAILED")]
    Failed,
}

impl EnrollmentStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "ENROLLED",
            EnrollmentStatus::Passed => "PASSED",
            EnrollmentStatus::Failed => "FAILED",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ENROLLED" => Some(EnrollmentStatus::Enrolled),
            "PASSED" => Some(EnrollmentStatus::Passed),
            "FAILED" => Some(EnrollmentStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaidStatus {
    #[display("PAID")]
    Paid,
    #[display("UNPAID")]
    Unpaid,
}

impl PaidStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            PaidStatus::Paid => "PAID",
            PaidStatus::Unpaid => "UNPAID",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PAID" => Some(PaidStatus::Paid),
            "UNPAID" => Some(PaidStatus::Unpaid),
            _ => None,
        }
    }
}

/// Enrollment entity. No version column: concurrent writers overwrite each
/// other.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub status: EnrollmentStatus,
    pub paid_status: PaidStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn is_paid(&self) -> bool {
        self.paid_status == PaidStatus::Paid
    }
}

/// Enrollment about to be created: always ENROLLED and UNPAID
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub enrolled_at: DateTime<Utc>,
}

impl NewEnrollment {
    pub fn new(user_id: UserId, course_id: CourseId) -> Self {
        Self {
            user_id,
            course_id,
            enrolled_at: Utc::now(),
        }
    }
}

/// Per-course totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseReport {
    pub course_id: CourseId,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub active: u64,
    pub paid: u64,
    /// `100 * passed / total`
    pub pass_rate: f64,
}

impl CourseReport {
    /// `None` when the course has no enrollments
    pub fn from_enrollments(course_id: CourseId, enrollments: &[Enrollment]) -> Option<Self> {
        if enrollments.is_empty() {
            return None;
        }

        let count = |status: EnrollmentStatus| {
            enrollments.iter().filter(|e| e.status == status).count() as u64
        };
        let total = enrollments.len() as u64;
        let passed = count(EnrollmentStatus::Passed);

        Some(Self {
            course_id,
            total,
            passed,
            failed: count(EnrollmentStatus::Failed),
            active: count(EnrollmentStatus::Enrolled),
            paid: enrollments.iter().filter(|e| e.is_paid()).count() as u64,
            pass_rate: passed as f64 * 100.0 / total as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(id: i32, status: EnrollmentStatus, paid_status: PaidStatus) -> Enrollment {
        Enrollment {
            id: EnrollmentId::new(id),
            user_id: UserId::new(id),
            course_id: CourseId::new(1),
            status,
            paid_status,
            enrolled_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(EnrollmentStatus::from_code("PASSED"), Some(EnrollmentStatus::Passed));
        assert_eq!(EnrollmentStatus::from_code("passed"), None);
        assert_eq!(EnrollmentStatus::Failed.to_string(), "FAILED");
        assert_eq!(PaidStatus::from_code("UNPAID"), Some(PaidStatus::Unpaid));
        assert_eq!(PaidStatus::Paid.code(), "PAID");
    }

    #[test]
    fn test_course_report() {
        let enrollments = vec![
            enrollment(1, EnrollmentStatus::Passed, PaidStatus::Paid),
            enrollment(2, EnrollmentStatus::Failed, PaidStatus::Paid),
            enrollment(3, EnrollmentStatus::Enrolled, PaidStatus::Unpaid),
            enrollment(4, EnrollmentStatus::Passed, PaidStatus::Paid),
        ];

        let report = CourseReport::from_enrollments(CourseId::new(1), &enrollments).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.active, 1);
        assert_eq!(report.paid, 3);
        assert_eq!(report.pass_rate, 50.0);
    }

    #[test]
    fn test_empty_course_has_no_report() {
        assert!(CourseReport::from_enrollments(CourseId::new(1), &[]).is_none());
    }
}
