//! HTTP Handlers
//!
//! Routes are guarded in `router.rs`; handlers receive the authorized caller
//! as an extension.

use crate::application::{
    CheckEnrollmentUseCase, CourseReportUseCase, EnrollUseCase, EnrollmentListingUseCase,
    PayUseCase, UpdateStatusInput, UpdateStatusUseCase,
};
use crate::domain::peers::{CourseCatalog, UserDirectory};
use crate::domain::repository::EnrollmentRepository;
use crate::error::EnrollmentResult;
use crate::presentation::dto::{
    CourseEnrollmentResponse, CourseReportResponse, CourseRequest, EnrollmentResponse,
    MessageResponse, StatusUpdateRequest, UserEnrollmentResponse,
};
use auth::{AuthorizationGate, Authorized};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use kernel::id::{CourseId, UserId};
use std::sync::Arc;

/// Shared state for enrollment handlers
pub struct EnrollmentAppState<R, U, C> {
    pub repo: Arc<R>,
    pub users: Arc<U>,
    pub courses: Arc<C>,
    pub gate: Arc<AuthorizationGate>,
}

impl<R, U, C> Clone for EnrollmentAppState<R, U, C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            users: Arc::clone(&self.users),
            courses: Arc::clone(&self.courses),
            gate: Arc::clone(&self.gate),
        }
    }
}

/// POST /api/enrollments/enroll
pub async fn enroll<R, U, C>(
    State(state): State<EnrollmentAppState<R, U, C>>,
    Extension(caller): Extension<Authorized>,
    Json(req): Json<CourseRequest>,
) -> EnrollmentResult<Json<EnrollmentResponse>>
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: UserDirectory + Send + Sync + 'static,
    C: CourseCatalog + Send + Sync + 'static,
{
    let use_case = EnrollUseCase::new(
        state.repo.clone(),
        state.users.clone(),
        state.courses.clone(),
    );
    let enrollment = use_case.execute(req.course_id, &caller).await?;

    Ok(Json(EnrollmentResponse::new(
        "Enrolled Student Successfully",
        enrollment,
    )))
}

/// POST /api/enrollments/pay
pub async fn pay<R, U, C>(
    State(state): State<EnrollmentAppState<R, U, C>>,
    Extension(caller): Extension<Authorized>,
    Json(req): Json<CourseRequest>,
) -> EnrollmentResult<Json<EnrollmentResponse>>
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: UserDirectory + Send + Sync + 'static,
    C: CourseCatalog + Send + Sync + 'static,
{
    let use_case = PayUseCase::new(
        state.repo.clone(),
        state.users.clone(),
        state.courses.clone(),
    );
    let enrollment = use_case.execute(req.course_id, &caller).await?;

    Ok(Json(EnrollmentResponse::new("Payment Successful", enrollment)))
}

/// POST /api/enrollments/status
pub async fn update_status<R, U, C>(
    State(state): State<EnrollmentAppState<R, U, C>>,
    Extension(caller): Extension<Authorized>,
    Json(req): Json<StatusUpdateRequest>,
) -> EnrollmentResult<Json<MessageResponse>>
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: UserDirectory + Send + Sync + 'static,
    C: CourseCatalog + Send + Sync + 'static,
{
    let use_case = UpdateStatusUseCase::new(
        state.repo.clone(),
        state.users.clone(),
        state.courses.clone(),
    );
    let input = UpdateStatusInput {
        user_id: req.user_id,
        course_id: req.course_id,
        status: req.status,
    };
    use_case.execute(input, &caller).await?;

    Ok(Json(MessageResponse::ok("Status updated successfully")))
}

/// GET /api/enrollments/{userId}/status/{courseId}
///
/// Bare boolean body; the quiz service decodes it directly.
pub async fn check_enrollment<R, U, C>(
    State(state): State<EnrollmentAppState<R, U, C>>,
    Path((user_id, course_id)): Path<(i32, i32)>,
) -> EnrollmentResult<Json<bool>>
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    let use_case = CheckEnrollmentUseCase::new(state.repo.clone());
    let paid = use_case
        .execute(UserId::new(user_id), CourseId::new(course_id))
        .await?;

    Ok(Json(paid))
}

/// GET /api/enrollments/course/{courseId}/report
pub async fn course_report<R, U, C>(
    State(state): State<EnrollmentAppState<R, U, C>>,
    Extension(caller): Extension<Authorized>,
    Path(course_id): Path<i32>,
) -> EnrollmentResult<Json<CourseReportResponse>>
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: Send + Sync + 'static,
    C: CourseCatalog + Send + Sync + 'static,
{
    let use_case = CourseReportUseCase::new(state.repo.clone(), state.courses.clone());
    let report = use_case.execute(CourseId::new(course_id), &caller).await?;

    Ok(Json(report.into()))
}

/// GET /api/enrollments/user/{userId}
pub async fn user_enrollments<R, U, C>(
    State(state): State<EnrollmentAppState<R, U, C>>,
    Extension(caller): Extension<Authorized>,
    Path(user_id): Path<i32>,
) -> EnrollmentResult<Json<Vec<UserEnrollmentResponse>>>
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: UserDirectory + Send + Sync + 'static,
    C: CourseCatalog + Send + Sync + 'static,
{
    let use_case = EnrollmentListingUseCase::new(
        state.repo.clone(),
        state.users.clone(),
        state.courses.clone(),
    );
    let entries = use_case.for_user(UserId::new(user_id), &caller).await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// GET /api/enrollments/course/{courseId}
pub async fn course_enrollments<R, U, C>(
    State(state): State<EnrollmentAppState<R, U, C>>,
    Extension(caller): Extension<Authorized>,
    Path(course_id): Path<i32>,
) -> EnrollmentResult<Json<Vec<CourseEnrollmentResponse>>>
where
    R: EnrollmentRepository + Send + Sync + 'static,
    U: UserDirectory + Send + Sync + 'static,
    C: CourseCatalog + Send + Sync + 'static,
{
    let use_case = EnrollmentListingUseCase::new(
        state.repo.clone(),
        state.users.clone(),
        state.courses.clone(),
    );
    let entries = use_case.for_course(CourseId::new(course_id), &caller).await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
