//! Application Layer
//!
//! Use cases for the enrollment domain.

pub mod course_report;
pub mod enroll;
pub mod listing;
pub mod resolve;
pub mod status_gate;

pub use course_report::CourseReportUseCase;
pub use enroll::{EnrollUseCase, PayUseCase};
pub use listing::{CourseEnrollmentEntry, EnrollmentListingUseCase, UserEnrollmentEntry};
pub use status_gate::{CheckEnrollmentUseCase, UpdateStatusInput, UpdateStatusUseCase};
