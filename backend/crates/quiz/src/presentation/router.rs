//! Quiz Router

use crate::domain::peers::{EnrollmentAuthority, UserDirectory};
use crate::presentation::handlers::{self, QuizAppState, QuizStore};
use auth::{Operation, OperationGuard, require_operation};
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Create the quiz router, mounted under `/api/courses/quiz`
pub fn quiz_router<R, U, E>(state: QuizAppState<R, U, E>) -> Router
where
    R: QuizStore,
    U: UserDirectory + Send + Sync + 'static,
    E: EnrollmentAuthority + Send + Sync + 'static,
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
            "/{quiz_id}/submit",
            post(handlers::submit_quiz::<R, U, E>).route_layer(guard(Operation::SubmitQuiz)),
        )
        .route(
            "/submissions/me",
            get(handlers::my_latest_submission::<R, U, E>)
                .route_layer(guard(Operation::ViewOwnSubmission)),
        )
        .route(
            "/submissions/{user_id}",
            get(handlers::user_latest_submission::<R, U, E>)
                .route_layer(guard(Operation::ViewUserSubmission)),
        )
        .route(
            "/create",
            post(handlers::create_quiz::<R, U, E>).route_layer(guard(Operation::CreateQuiz)),
        )
        .route(
            "/questions",
            post(handlers::add_question::<R, U, E>).route_layer(guard(Operation::AddQuestion)),
        )
        .route(
            "/get/{course_id}",
            get(handlers::quiz_for_course::<R, U, E>).route_layer(guard(Operation::ViewQuiz)),
        )
        .with_state(state)
}
