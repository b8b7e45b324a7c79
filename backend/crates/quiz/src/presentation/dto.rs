//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CourseId, OptionId, QuestionId, QuizId, SubmissionId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::SubmissionReport;
use crate::domain::entities::{
    Answer, GradedAnswer, NewOption, NewQuestion, NewQuiz, QuestionWithOptions, QuizContent,
};
use crate::domain::services::{Outcome, QuizScore};

/// Request for POST /api/courses/quiz/{quizId}/submit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub quiz_id: QuizId,
    #[serde(default)]
    pub answers: Vec<AnswerRequest>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: QuestionId,
    pub selected_option_id: OptionId,
}

impl From<AnswerRequest> for Answer {
    fn from(req: AnswerRequest) -> Self {
        Answer {
            question_id: req.question_id,
            selected_option_id: req.selected_option_id,
        }
    }
}

/// Response for POST /api/courses/quiz/{quizId}/submit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub success: bool,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub result: Outcome,
}

impl From<QuizScore> for SubmitQuizResponse {
    fn from(score: QuizScore) -> Self {
        Self {
            success: true,
            correct_answers: score.correct,
            total_questions: score.total,
            percentage: score.percentage,
            result: score.outcome(),
        }
    }
}

/// Response for GET /api/courses/quiz/submissions/*
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionEnvelope {
    pub success: bool,
    pub submission: SubmissionResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub submission_id: SubmissionId,
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub submitted_at: DateTime<Utc>,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub result: Outcome,
    pub percentage: f64,
    pub answers: Vec<AnswerResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub question_id: QuestionId,
    pub question_text: String,
    pub selected_option_id: OptionId,
    pub selected_option_text: String,
    pub correct: bool,
}

impl From<GradedAnswer> for AnswerResponse {
    fn from(answer: GradedAnswer) -> Self {
        Self {
            question_id: answer.question_id,
            question_text: answer.question_text,
            selected_option_id: answer.selected_option_id,
            selected_option_text: answer.selected_option_text,
            correct: answer.correct,
        }
    }
}

impl From<SubmissionReport> for SubmissionEnvelope {
    fn from(report: SubmissionReport) -> Self {
        let SubmissionReport { submission, score } = report;
        Self {
            success: true,
            submission: SubmissionResponse {
                submission_id: submission.id,
                quiz_id: submission.quiz_id,
                user_id: submission.user_id,
                submitted_at: submission.submitted_at,
                correct_answers: score.correct,
                total_questions: score.total,
                result: score.outcome(),
                percentage: score.percentage,
                answers: submission.answers.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// Request for POST /api/courses/quiz/create
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub course_id: CourseId,
    pub title: String,
}

impl From<CreateQuizRequest> for NewQuiz {
    fn from(req: CreateQuizRequest) -> Self {
        NewQuiz {
            course_id: req.course_id,
            title: req.title,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizResponse {
    pub success: bool,
    pub message: &'static str,
    pub quiz_id: QuizId,
}

impl CreateQuizResponse {
    pub fn new(quiz_id: QuizId) -> Self {
        Self {
            success: true,
            message: "Quiz Created Successfully",
            quiz_id,
        }
    }
}

/// Request for POST /api/courses/quiz/questions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    pub quiz_id: QuizId,
    pub text: String,
    #[serde(default)]
    pub options: Vec<OptionRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionRequest {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl From<AddQuestionRequest> for NewQuestion {
    fn from(req: AddQuestionRequest) -> Self {
        NewQuestion {
            quiz_id: req.quiz_id,
            text: req.text,
            options: req
                .options
                .into_iter()
                .map(|option| NewOption {
                    text: option.text,
                    correct: option.correct,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionResponse {
    pub success: bool,
    pub message: &'static str,
    pub question_id: QuestionId,
}

impl AddQuestionResponse {
    pub fn new(question_id: QuestionId) -> Self {
        Self {
            success: true,
            message: "Question added",
            question_id,
        }
    }
}

/// Response for GET /api/courses/quiz/get/{courseId}.
///
/// Options never carry their correctness here.
#[derive(Debug, Clone, Serialize)]
pub struct QuizEnvelope {
    pub success: bool,
    pub quiz: QuizResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub id: QuizId,
    pub title: String,
    pub questions: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<OptionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionResponse {
    pub id: OptionId,
    pub text: String,
}

impl From<QuestionWithOptions> for QuestionResponse {
    fn from(entry: QuestionWithOptions) -> Self {
        Self {
            id: entry.question.id,
            text: entry.question.text,
            options: entry
                .options
                .into_iter()
                .map(|option| OptionResponse {
                    id: option.id,
                    text: option.text,
                })
                .collect(),
        }
    }
}

impl From<QuizContent> for QuizEnvelope {
    fn from(content: QuizContent) -> Self {
        Self {
            success: true,
            quiz: QuizResponse {
                id: content.quiz.id,
                title: content.quiz.title,
                questions: content.questions.into_iter().map(Into::into).collect(),
            },
        }
    }
}
