//! Application Layer
//!
//! Use cases for the quiz domain.

pub mod config;
pub mod quiz_authoring;
pub mod quiz_content;
pub mod submission_query;
pub mod submit_quiz;

pub use config::QuizConfig;
pub use quiz_authoring::{AddQuestionUseCase, CreateQuizUseCase};
pub use quiz_content::QuizContentUseCase;
pub use submission_query::{SubmissionQueryUseCase, SubmissionReport};
pub use submit_quiz::{SubmitQuizInput, SubmitQuizOutput, SubmitQuizUseCase};
