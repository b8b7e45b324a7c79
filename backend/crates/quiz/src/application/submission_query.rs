//! Submission Query Use Case
//!
//! Latest submission of a user, graded again at read time.

use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::QuizConfig;
use crate::domain::entities::Submission;
use crate::domain::repository::SubmissionRepository;
use crate::domain::services::QuizScore;
use crate::error::{QuizError, QuizResult};

/// Submission together with its recomputed score
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub submission: Submission,
    pub score: QuizScore,
}

pub struct SubmissionQueryUseCase<S>
where
    S: SubmissionRepository,
{
    submission_repo: Arc<S>,
    config: Arc<QuizConfig>,
}

impl<S> SubmissionQueryUseCase<S>
where
    S: SubmissionRepository + Sync,
{
    pub fn new(submission_repo: Arc<S>, config: Arc<QuizConfig>) -> Self {
        Self {
            submission_repo,
            config,
        }
    }

    pub async fn latest_for(&self, user_id: UserId) -> QuizResult<SubmissionReport> {
        let submission = self
            .submission_repo
            .find_latest_by_user(user_id)
            .await?
            .ok_or(QuizError::NoSubmissions)?;

        let score = QuizScore::from_answers(
            submission.answers.iter().map(|answer| answer.correct),
            self.config.pass_threshold,
        );

        Ok(SubmissionReport { submission, score })
    }
}
