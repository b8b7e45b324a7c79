//! Enrollment Router

use crate::domain::peers::{CourseCatalog, UserDirectory};
use crate::domain::repository::EnrollmentRepository;
use crate::presentation::handlers::{self, EnrollmentAppState};
use auth::{Operation, OperationGuard, require_operation};
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Create the enrollment router, mounted under `/api/enrollments`
pub fn enrollment_router<R, U, C>(state: EnrollmentAppState<R, U, C>) -> Router
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: UserDirectory + Send + Sync + 'static,
    C: CourseCatalog + Send + Sync + 'static,
{
    let gate = state.gate.clone();
    let guard = |operation| {
        middleware::from_fn_with_state(
            OperationGuard::new(gate.clone(), operation),
            require_operation,
        )
    };

    Router::new()
        .route(
            "/enroll",
            post(handlers::enroll::<R, U, C>).route_layer(guard(Operation::Enroll)),
        )
        .route(
            "/pay",
            post(handlers::pay::<R, U, C>).route_layer(guard(Operation::Pay)),
        )
        .route(
            "/status",
            post(handlers::update_status::<R, U, C>)
                .route_layer(guard(Operation::UpdateEnrollmentStatus)),
        )
        .route(
            "/{user_id}/status/{course_id}",
            get(handlers::check_enrollment::<R, U, C>)
                .route_layer(guard(Operation::CheckEnrollment)),
        )
        .route(
            "/course/{course_id}/report",
            get(handlers::course_report::<R, U, C>).route_layer(guard(Operation::CourseReport)),
        )
        .route(
            "/user/{user_id}",
            get(handlers::user_enrollments::<R, U, C>)
                .route_layer(guard(Operation::ListUserEnrollments)),
        )
        .route(
            "/course/{course_id}",
            get(handlers::course_enrollments::<R, U, C>)
                .route_layer(guard(Operation::ListCourseEnrollments)),
        )
        .with_state(state)
}
