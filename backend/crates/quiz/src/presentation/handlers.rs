//! HTTP Handlers
//!
//! Every route is wrapped in an operation guard (see `router.rs`), so the
//! caller arrives here already authorized.

use crate::application::config::QuizConfig;
use crate::application::quiz_authoring::{AddQuestionUseCase, CreateQuizUseCase};
use crate::application::quiz_content::QuizContentUseCase;
use crate::application::submission_query::SubmissionQueryUseCase;
use crate::application::submit_quiz::{SubmitQuizInput, SubmitQuizUseCase};
use crate::domain::peers::{EnrollmentAuthority, UserDirectory};
use crate::domain::repository::{QuizRepository, SubmissionRepository};
use crate::error::{QuizError, QuizResult};
use crate::presentation::dto::{
    AddQuestionRequest, AddQuestionResponse, CreateQuizRequest, CreateQuizResponse, QuizEnvelope,
    SubmissionEnvelope, SubmitQuizRequest, SubmitQuizResponse,
};
use auth::{AuthorizationGate, Authorized};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::id::{CourseId, QuizId, UserId};
use std::sync::Arc;

/// Storage the quiz handlers need
pub trait QuizStore: QuizRepository + SubmissionRepository + Send + Sync + 'static {}

impl<T> QuizStore for T where T: QuizRepository + SubmissionRepository + Send + Sync + 'static {}

/// Shared state for quiz handlers
pub struct QuizAppState<R, U, E> {
    pub repo: Arc<R>,
    pub users: Arc<U>,
    pub enrollments: Arc<E>,
    pub gate: Arc<AuthorizationGate>,
    pub config: Arc<QuizConfig>,
}

impl<R, U, E> Clone for QuizAppState<R, U, E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            users: Arc::clone(&self.users),
            enrollments: Arc::clone(&self.enrollments),
            gate: Arc::clone(&self.gate),
            config: Arc::clone(&self.config),
        }
    }
}

/// POST /api/courses/quiz/{quizId}/submit
pub async fn submit_quiz<R, U, E>(
    State(state): State<QuizAppState<R, U, E>>,
    Extension(caller): Extension<Authorized>,
    Path(quiz_id): Path<i32>,
    Json(req): Json<SubmitQuizRequest>,
) -> QuizResult<Json<SubmitQuizResponse>>
where
    R: QuizStore,
    U: UserDirectory + Send + Sync + 'static,
    E: EnrollmentAuthority + Send + Sync + 'static,
{
    if QuizId::new(quiz_id) != req.quiz_id {
        return Err(QuizError::QuizIdMismatch);
    }

    let use_case = SubmitQuizUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.users.clone(),
        state.enrollments.clone(),
        state.config.clone(),
    );

    let input = SubmitQuizInput {
        quiz_id: req.quiz_id,
        answers: req.answers.into_iter().map(Into::into).collect(),
    };

    // The propagation task keeps running after its handle is dropped
    let output = use_case.execute(input, &caller).await?;

    Ok(Json(output.score.into()))
}

/// GET /api/courses/quiz/submissions/me
pub async fn my_latest_submission<R, U, E>(
    State(state): State<QuizAppState<R, U, E>>,
    Extension(caller): Extension<Authorized>,
) -> QuizResult<Json<SubmissionEnvelope>>
where
    R: QuizStore,
    U: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    let use_case = SubmissionQueryUseCase::new(state.repo.clone(), state.config.clone());
    let report = use_case.latest_for(caller.principal.user_id).await?;

    Ok(Json(report.into()))
}

/// GET /api/courses/quiz/submissions/{userId}
pub async fn user_latest_submission<R, U, E>(
    State(state): State<QuizAppState<R, U, E>>,
    Path(user_id): Path<i32>,
) -> QuizResult<Json<SubmissionEnvelope>>
where
    R: QuizStore,
    U: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    let use_case = SubmissionQueryUseCase::new(state.repo.clone(), state.config.clone());
    let report = use_case.latest_for(UserId::new(user_id)).await?;

    Ok(Json(report.into()))
}

/// POST /api/courses/quiz/create
pub async fn create_quiz<R, U, E>(
    State(state): State<QuizAppState<R, U, E>>,
    Extension(caller): Extension<Authorized>,
    Json(req): Json<CreateQuizRequest>,
) -> QuizResult<Json<CreateQuizResponse>>
where
    R: QuizStore,
    U: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    tracing::debug!(
        trainer_id = %caller.principal.user_id,
        course_id = %req.course_id,
        "Creating quiz"
    );

    let quiz = CreateQuizUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;

    Ok(Json(CreateQuizResponse::new(quiz.id)))
}

/// POST /api/courses/quiz/questions
pub async fn add_question<R, U, E>(
    State(state): State<QuizAppState<R, U, E>>,
    Json(req): Json<AddQuestionRequest>,
) -> QuizResult<(StatusCode, Json<AddQuestionResponse>)>
where
    R: QuizStore,
    U: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    let added = AddQuestionUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddQuestionResponse::new(added.question.id)),
    ))
}

/// GET /api/courses/quiz/get/{courseId}
pub async fn quiz_for_course<R, U, E>(
    State(state): State<QuizAppState<R, U, E>>,
    Path(course_id): Path<i32>,
) -> QuizResult<Json<QuizEnvelope>>
where
    R: QuizStore,
    U: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    let content = QuizContentUseCase::new(state.repo.clone())
        .for_course(CourseId::new(course_id))
        .await?;

    Ok(Json(content.into()))
}
