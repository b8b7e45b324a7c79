//! Domain Entities
//!
//! Quizzes, their questions and options, and learner submissions.

use chrono::{DateTime, Utc};
use kernel::id::{CourseId, OptionId, QuestionId, QuizId, SubmissionId, UserId};

/// Quiz entity, one per course
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: QuizId,
    pub course_id: CourseId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub quiz_id: QuizId,
    pub text: String,
}

/// Answer option. Nothing stops a question from having several correct
/// options; scoring only looks at the selected one.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOption {
    pub id: OptionId,
    pub question_id: QuestionId,
    pub text: String,
    pub correct: bool,
}

/// Quiz about to be created for a course
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub course_id: CourseId,
    pub title: String,
}

/// Question about to be added, with its options
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub quiz_id: QuizId,
    pub text: String,
    pub options: Vec<NewOption>,
}

#[derive(Debug, Clone)]
pub struct NewOption {
    pub text: String,
    pub correct: bool,
}

/// Question with its options, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionWithOptions {
    pub question: Question,
    pub options: Vec<QuizOption>,
}

/// Quiz as a learner sees it before submitting
#[derive(Debug, Clone, PartialEq)]
pub struct QuizContent {
    pub quiz: Quiz,
    pub questions: Vec<QuestionWithOptions>,
}

/// Learner's selection for one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub question_id: QuestionId,
    pub selected_option_id: OptionId,
}

/// Submission about to be persisted
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<Answer>,
}

impl NewSubmission {
    pub fn new(quiz_id: QuizId, user_id: UserId, answers: Vec<Answer>) -> Self {
        Self {
            quiz_id,
            user_id,
            submitted_at: Utc::now(),
            answers,
        }
    }
}

/// Stored answer joined with its question and option.
///
/// `correct` is read from the option at load time; it is never stored with
/// the answer.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAnswer {
    pub question_id: QuestionId,
    pub question_text: String,
    pub selected_option_id: OptionId,
    pub selected_option_text: String,
    pub correct: bool,
}

impl GradedAnswer {
    pub fn new(question: &Question, option: &QuizOption) -> Self {
        Self {
            question_id: question.id,
            question_text: question.text.clone(),
            selected_option_id: option.id,
            selected_option_text: option.text.clone(),
            correct: option.correct,
        }
    }
}

/// Persisted submission. Immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: SubmissionId,
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<GradedAnswer>,
}
