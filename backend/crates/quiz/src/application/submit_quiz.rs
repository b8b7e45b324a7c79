//! Submit Quiz Use Case
//!
//! The submission saga. Each step short-circuits on failure; nothing is
//! written before the persistence step, and nothing after it is undone.
//! Propagating the outcome to the enrollment service is best effort: it runs
//! on its own task and its failure is only logged.

use auth::Authorized;
use kernel::id::{CourseId, QuizId, SubmissionId, UserId};
use platform::client::BearerToken;
use platform::remote::{Dependency, RemoteResult};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::config::QuizConfig;
use crate::domain::entities::{Answer, NewSubmission};
use crate::domain::peers::{EnrollmentAuthority, StatusUpdate, UserDirectory};
use crate::domain::repository::{QuizRepository, SubmissionRepository};
use crate::domain::saga::SagaStage;
use crate::domain::services::{Outcome, QuizScore};
use crate::error::{QuizError, QuizResult};

/// Input DTO for submit quiz
#[derive(Debug, Clone)]
pub struct SubmitQuizInput {
    pub quiz_id: QuizId,
    pub answers: Vec<Answer>,
}

/// Output DTO for submit quiz
#[derive(Debug)]
pub struct SubmitQuizOutput {
    pub submission_id: SubmissionId,
    pub score: QuizScore,
    /// Detached propagation task. Dropping the handle does not cancel it.
    pub propagation: JoinHandle<SagaStage>,
}

/// Submit Quiz Use Case
pub struct SubmitQuizUseCase<Q, S, U, E>
where
    Q: QuizRepository,
    S: SubmissionRepository,
    U: UserDirectory,
    E: EnrollmentAuthority,
{
    quiz_repo: Arc<Q>,
    submission_repo: Arc<S>,
    users: Arc<U>,
    enrollments: Arc<E>,
    config: Arc<QuizConfig>,
}

impl<Q, S, U, E> SubmitQuizUseCase<Q, S, U, E>
where
    Q: QuizRepository + Sync,
    S: SubmissionRepository + Sync,
    U: UserDirectory + Sync,
    E: EnrollmentAuthority + Send + Sync + 'static,
{
    pub fn new(
        quiz_repo: Arc<Q>,
        submission_repo: Arc<S>,
        users: Arc<U>,
        enrollments: Arc<E>,
        config: Arc<QuizConfig>,
    ) -> Self {
        Self {
            quiz_repo,
            submission_repo,
            users,
            enrollments,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SubmitQuizInput,
        caller: &Authorized,
    ) -> QuizResult<SubmitQuizOutput> {
        let user_id = caller.principal.user_id;
        let mut stage = SagaStage::Start;

        match self.run(&input, user_id, &caller.token, &mut stage).await {
            Ok(output) => Ok(output),
            Err(e) => {
                tracing::warn!(
                    %user_id,
                    quiz_id = %input.quiz_id,
                    %stage,
                    error = %e,
                    "Quiz submission aborted"
                );
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        input: &SubmitQuizInput,
        user_id: UserId,
        token: &BearerToken,
        stage: &mut SagaStage,
    ) -> QuizResult<SubmitQuizOutput> {
        // 1. Caller must still exist in the user directory
        match self.users.fetch_user(user_id, token).await {
            RemoteResult::Success(_) => {}
            RemoteResult::NotFound => return Err(QuizError::UserNotFound(user_id)),
            RemoteResult::Unavailable => {
                return Err(QuizError::DependencyUnavailable(Dependency::User));
            }
        }
        *stage = SagaStage::UserVerified;

        // 2. Quiz is local
        let quiz = self
            .quiz_repo
            .find_quiz(input.quiz_id)
            .await?
            .ok_or(QuizError::QuizNotFound)?;
        *stage = SagaStage::QuizResolved;

        // 3. Enrolled and paid for the quiz's course
        match self
            .enrollments
            .is_enrolled(user_id, quiz.course_id, token)
            .await
        {
            RemoteResult::Success(true) => {}
            RemoteResult::Success(false) | RemoteResult::NotFound => {
                return Err(QuizError::NotEnrolled);
            }
            RemoteResult::Unavailable => {
                return Err(QuizError::DependencyUnavailable(Dependency::Enrollment));
            }
        }
        *stage = SagaStage::EnrollmentConfirmed;

        // 4. One submission per (user, quiz); the unique index covers races
        if self.submission_repo.exists(user_id, quiz.id).await? {
            return Err(QuizError::DuplicateSubmission);
        }
        *stage = SagaStage::DuplicateChecked;

        // 5. Validate and store atomically
        let submission = NewSubmission::new(quiz.id, user_id, input.answers.clone());
        let stored = self.submission_repo.persist(&submission).await?;
        *stage = SagaStage::Persisted;

        // 6. Grade
        let score = QuizScore::from_answers(
            stored.answers.iter().map(|answer| answer.correct),
            self.config.pass_threshold,
        );

        tracing::info!(
            %user_id,
            quiz_id = %quiz.id,
            submission_id = %stored.id,
            correct = score.correct,
            total = score.total,
            percentage = score.percentage,
            outcome = %score.outcome(),
            "Quiz submitted"
        );

        // 7. Best-effort status propagation
        let propagation = self.spawn_propagation(user_id, quiz.course_id, score.outcome(), token);

        Ok(SubmitQuizOutput {
            submission_id: stored.id,
            score,
            propagation,
        })
    }

    fn spawn_propagation(
        &self,
        user_id: UserId,
        course_id: CourseId,
        outcome: Outcome,
        token: &BearerToken,
    ) -> JoinHandle<SagaStage> {
        let enrollments = Arc::clone(&self.enrollments);
        let token = token.clone();
        let update = StatusUpdate::new(user_id, course_id, outcome);

        tokio::spawn(async move {
            match enrollments.update_status(&update, &token).await {
                RemoteResult::Success(()) => {
                    tracing::info!(
                        %user_id,
                        %course_id,
                        status = update.status,
                        stage = %SagaStage::StatusPropagated,
                        "Enrollment status updated"
                    );
                    SagaStage::StatusPropagated
                }
                failure => {
                    // Known gap: nothing reconciles this later
                    tracing::error!(
                        %user_id,
                        %course_id,
                        status = update.status,
                        not_found = failure.is_not_found(),
                        stage = %SagaStage::PropagationFailed,
                        "Enrollment status update failed"
                    );
                    SagaStage::PropagationFailed
                }
            }
        })
    }
}
