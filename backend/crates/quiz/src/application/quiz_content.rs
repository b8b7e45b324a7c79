//! Quiz Content Use Case
//!
//! The quiz of a course with its questions and options, for a learner about
//! to take it.

use kernel::id::CourseId;
use std::sync::Arc;

use crate::domain::entities::QuizContent;
use crate::domain::repository::QuizRepository;
use crate::error::{QuizError, QuizResult};

pub struct QuizContentUseCase<Q>
where
    Q: QuizRepository,
{
    quiz_repo: Arc<Q>,
}

impl<Q> QuizContentUseCase<Q>
where
    Q: QuizRepository + Sync,
{
    pub fn new(quiz_repo: Arc<Q>) -> Self {
        Self { quiz_repo }
    }

    pub async fn for_course(&self, course_id: CourseId) -> QuizResult<QuizContent> {
        let quiz = self
            .quiz_repo
            .find_quiz_by_course(course_id)
            .await?
            .ok_or(QuizError::NoQuizForCourse(course_id))?;

        let questions = self.quiz_repo.list_questions(quiz.id).await?;

        Ok(QuizContent { quiz, questions })
    }
}
