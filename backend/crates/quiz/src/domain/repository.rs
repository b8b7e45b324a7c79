//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{
    NewQuestion, NewQuiz, NewSubmission, QuestionWithOptions, Quiz, Submission,
};
use crate::error::QuizResult;
use kernel::id::{CourseId, QuizId, UserId};

/// Quiz repository trait
#[trait_variant::make(QuizRepository: Send)]
pub trait LocalQuizRepository {
    async fn find_quiz(&self, quiz_id: QuizId) -> QuizResult<Option<Quiz>>;

    async fn find_quiz_by_course(&self, course_id: CourseId) -> QuizResult<Option<Quiz>>;

    /// Whether the course catalog table has this course
    async fn course_exists(&self, course_id: CourseId) -> QuizResult<bool>;

    /// Insert a quiz. A second quiz for the same course surfaces as
    /// `QuizError::QuizAlreadyExists`.
    async fn create_quiz(&self, quiz: &NewQuiz) -> QuizResult<Quiz>;

    /// Insert a question and its options in one transaction.
    /// `QuizError::QuizNotFound` if the quiz is gone.
    async fn add_question(&self, question: &NewQuestion) -> QuizResult<QuestionWithOptions>;

    /// Questions of a quiz with their options, both in insertion order
    async fn list_questions(&self, quiz_id: QuizId) -> QuizResult<Vec<QuestionWithOptions>>;
}

/// Submission repository trait
#[trait_variant::make(SubmissionRepository: Send)]
pub trait LocalSubmissionRepository {
    async fn exists(&self, user_id: UserId, quiz_id: QuizId) -> QuizResult<bool>;

    /// Validate and store a submission with all its answers in one transaction.
    ///
    /// Every question must belong to the submission's quiz and every selected
    /// option to its question; otherwise nothing is written. A concurrent
    /// duplicate surfaces as `QuizError::DuplicateSubmission`.
    async fn persist(&self, submission: &NewSubmission) -> QuizResult<Submission>;

    /// Most recent submission of a user, answers graded
    async fn find_latest_by_user(&self, user_id: UserId) -> QuizResult<Option<Submission>>;
}
