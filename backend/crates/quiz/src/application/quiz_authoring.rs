//! Quiz Authoring Use Cases
//!
//! Trainers create one quiz per course and append questions to it.

use std::sync::Arc;

use crate::domain::entities::{NewQuestion, NewQuiz, QuestionWithOptions, Quiz};
use crate::domain::repository::QuizRepository;
use crate::error::{QuizError, QuizResult};

/// Create Quiz Use Case
pub struct CreateQuizUseCase<Q>
where
    Q: QuizRepository,
{
    quiz_repo: Arc<Q>,
}

impl<Q> CreateQuizUseCase<Q>
where
    Q: QuizRepository + Sync,
{
    pub fn new(quiz_repo: Arc<Q>) -> Self {
        Self { quiz_repo }
    }

    /// ## Errors
    /// * `EmptyTitle` - blank title (400)
    /// * `CourseNotFound` - course missing from the catalog (404)
    /// * `QuizAlreadyExists` - the course already has a quiz (409)
    pub async fn execute(&self, input: NewQuiz) -> QuizResult<Quiz> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(QuizError::EmptyTitle);
        }

        if !self.quiz_repo.course_exists(input.course_id).await? {
            return Err(QuizError::CourseNotFound(input.course_id));
        }

        // The unique index still decides under concurrent creates
        if self
            .quiz_repo
            .find_quiz_by_course(input.course_id)
            .await?
            .is_some()
        {
            return Err(QuizError::QuizAlreadyExists);
        }

        let quiz = self
            .quiz_repo
            .create_quiz(&NewQuiz {
                course_id: input.course_id,
                title: title.to_owned(),
            })
            .await?;

        tracing::info!(quiz_id = %quiz.id, course_id = %quiz.course_id, "Quiz created");
        Ok(quiz)
    }
}

/// Add Question Use Case
pub struct AddQuestionUseCase<Q>
where
    Q: QuizRepository,
{
    quiz_repo: Arc<Q>,
}

impl<Q> AddQuestionUseCase<Q>
where
    Q: QuizRepository + Sync,
{
    pub fn new(quiz_repo: Arc<Q>) -> Self {
        Self { quiz_repo }
    }

    pub async fn execute(&self, input: NewQuestion) -> QuizResult<QuestionWithOptions> {
        if self.quiz_repo.find_quiz(input.quiz_id).await?.is_none() {
            return Err(QuizError::QuizNotFound);
        }

        let added = self.quiz_repo.add_question(&input).await?;

        tracing::info!(
            quiz_id = %input.quiz_id,
            question_id = %added.question.id,
            options = added.options.len(),
            "Question added"
        );
        Ok(added)
    }
}
