//! PostgreSQL Repository Implementations

use crate::domain::entities::{
    GradedAnswer, NewQuestion, NewQuiz, NewSubmission, Question, QuestionWithOptions, Quiz,
    QuizOption, Submission,
};
use crate::domain::repository::{QuizRepository, SubmissionRepository};
use crate::error::{QuizError, QuizResult};
use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{CourseId, OptionId, QuestionId, QuizId, SubmissionId, UserId};
use sqlx::PgPool;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgQuizRepository {
    pool: PgPool,
}

impl PgQuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_answers(&self, submission_id: SubmissionId) -> QuizResult<Vec<GradedAnswer>> {
        let rows = sqlx::query_as::<_, GradedAnswerRow>(
            r#"
            SELECT
                q.id AS question_id,
                q.text AS question_text,
                o.id AS selected_option_id,
                o.text AS selected_option_text,
                o.correct
            FROM question_answers a
            JOIN questions q ON q.id = a.question_id
            JOIN question_options o ON o.id = a.selected_option_id
            WHERE a.submission_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(submission_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GradedAnswerRow::into_graded_answer).collect())
    }
}

impl QuizRepository for PgQuizRepository {
    async fn find_quiz(&self, quiz_id: QuizId) -> QuizResult<Option<Quiz>> {
        let row = sqlx::query_as::<_, QuizRow>(
            "SELECT id, course_id, title FROM quizzes WHERE id = $1",
        )
        .bind(quiz_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(QuizRow::into_quiz))
    }

    async fn find_quiz_by_course(&self, course_id: CourseId) -> QuizResult<Option<Quiz>> {
        let row = sqlx::query_as::<_, QuizRow>(
            "SELECT id, course_id, title FROM quizzes WHERE course_id = $1",
        )
        .bind(course_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(QuizRow::into_quiz))
    }

    async fn course_exists(&self, course_id: CourseId) -> QuizResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(course_id.get())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create_quiz(&self, quiz: &NewQuiz) -> QuizResult<Quiz> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            INSERT INTO quizzes (course_id, title)
            VALUES ($1, $2)
            RETURNING id, course_id, title
            "#,
        )
        .bind(quiz.course_id.get())
        .bind(&quiz.title)
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => Ok(row.into_quiz()),
            Err(e) if is_unique_violation(&e) => Err(QuizError::QuizAlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    async fn add_question(&self, question: &NewQuestion) -> QuizResult<QuestionWithOptions> {
        let mut tx = self.pool.begin().await?;

        // Lock the quiz row so a concurrent delete cannot orphan the question
        sqlx::query_scalar::<_, i32>("SELECT id FROM quizzes WHERE id = $1 FOR SHARE")
            .bind(question.quiz_id.get())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(QuizError::QuizNotFound)?;

        let question_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO questions (quiz_id, text) VALUES ($1, $2) RETURNING id",
        )
        .bind(question.quiz_id.get())
        .bind(&question.text)
        .fetch_one(&mut *tx)
        .await?;
        let question_id = QuestionId::new(question_id);

        let mut options = Vec::with_capacity(question.options.len());
        for option in &question.options {
            let option_id = sqlx::query_scalar::<_, i32>(
                r#"
                INSERT INTO question_options (question_id, text, correct)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(question_id.get())
            .bind(&option.text)
            .bind(option.correct)
            .fetch_one(&mut *tx)
            .await?;

            options.push(QuizOption {
                id: OptionId::new(option_id),
                question_id,
                text: option.text.clone(),
                correct: option.correct,
            });
        }

        tx.commit().await?;

        Ok(QuestionWithOptions {
            question: Question {
                id: question_id,
                quiz_id: question.quiz_id,
                text: question.text.clone(),
            },
            options,
        })
    }

    async fn list_questions(&self, quiz_id: QuizId) -> QuizResult<Vec<QuestionWithOptions>> {
        let rows = sqlx::query_as::<_, QuestionOptionRow>(
            r#"
            SELECT
                q.id AS question_id,
                q.text AS question_text,
                o.id AS option_id,
                o.text AS option_text,
                o.correct
            FROM questions q
            LEFT JOIN question_options o ON o.question_id = q.id
            WHERE q.quiz_id = $1
            ORDER BY q.id, o.id
            "#,
        )
        .bind(quiz_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(QuestionOptionRow::group(quiz_id, rows))
    }
}

impl SubmissionRepository for PgQuizRepository {
    async fn exists(&self, user_id: UserId, quiz_id: QuizId) -> QuizResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM quiz_submissions WHERE user_id = $1 AND quiz_id = $2)",
        )
        .bind(user_id.get())
        .bind(quiz_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn persist(&self, submission: &NewSubmission) -> QuizResult<Submission> {
        // Dropping the transaction on any early return rolls it back
        let mut tx = self.pool.begin().await?;

        let mut graded = Vec::with_capacity(submission.answers.len());
        for answer in &submission.answers {
            let question = sqlx::query_as::<_, (String,)>(
                "SELECT text FROM questions WHERE id = $1 AND quiz_id = $2",
            )
            .bind(answer.question_id.get())
            .bind(submission.quiz_id.get())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(QuizError::QuestionNotFound(answer.question_id))?;

            let option = sqlx::query_as::<_, (String, bool)>(
                "SELECT text, correct FROM question_options WHERE id = $1 AND question_id = $2",
            )
            .bind(answer.selected_option_id.get())
            .bind(answer.question_id.get())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(QuizError::OptionNotFound(answer.selected_option_id))?;

            graded.push(GradedAnswer {
                question_id: answer.question_id,
                question_text: question.0,
                selected_option_id: answer.selected_option_id,
                selected_option_text: option.0,
                correct: option.1,
            });
        }

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO quiz_submissions (quiz_id, user_id, submitted_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(submission.quiz_id.get())
        .bind(submission.user_id.get())
        .bind(submission.submitted_at)
        .fetch_one(&mut *tx)
        .await;

        let submission_id = match inserted {
            Ok(id) => SubmissionId::new(id),
            Err(e) if is_unique_violation(&e) => {
                tracing::warn!(
                    user_id = %submission.user_id,
                    quiz_id = %submission.quiz_id,
                    "Concurrent duplicate submission hit unique constraint"
                );
                return Err(QuizError::DuplicateSubmission);
            }
            Err(e) => return Err(e.into()),
        };

        for answer in &submission.answers {
            sqlx::query(
                r#"
                INSERT INTO question_answers (submission_id, question_id, selected_option_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(submission_id.get())
            .bind(answer.question_id.get())
            .bind(answer.selected_option_id.get())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            submission_id = %submission_id,
            answers = submission.answers.len(),
            "Submission persisted"
        );

        Ok(Submission {
            id: submission_id,
            quiz_id: submission.quiz_id,
            user_id: submission.user_id,
            submitted_at: submission.submitted_at,
            answers: graded,
        })
    }

    async fn find_latest_by_user(&self, user_id: UserId) -> QuizResult<Option<Submission>> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT id, quiz_id, user_id, submitted_at
            FROM quiz_submissions
            WHERE user_id = $1
            ORDER BY submitted_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let answers = self.load_answers(SubmissionId::new(row.id)).await?;
        Ok(Some(row.into_submission(answers)))
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct QuizRow {
    id: i32,
    course_id: i32,
    title: String,
}

impl QuizRow {
    fn into_quiz(self) -> Quiz {
        Quiz {
            id: QuizId::new(self.id),
            course_id: CourseId::new(self.course_id),
            title: self.title,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionOptionRow {
    question_id: i32,
    question_text: String,
    option_id: Option<i32>,
    option_text: Option<String>,
    correct: Option<bool>,
}

impl QuestionOptionRow {
    /// Fold rows ordered by question id into one entry per question
    fn group(quiz_id: QuizId, rows: Vec<QuestionOptionRow>) -> Vec<QuestionWithOptions> {
        let mut grouped: Vec<QuestionWithOptions> = Vec::new();
        for row in rows {
            let question_id = QuestionId::new(row.question_id);
            let starts_new = grouped
                .last()
                .is_none_or(|last| last.question.id != question_id);
            if starts_new {
                grouped.push(QuestionWithOptions {
                    question: Question {
                        id: question_id,
                        quiz_id,
                        text: row.question_text,
                    },
                    options: Vec::new(),
                });
            }

            // A question without options comes back as one row of NULLs
            if let (Some(id), Some(text), Some(correct), Some(last)) =
                (row.option_id, row.option_text, row.correct, grouped.last_mut())
            {
                last.options.push(QuizOption {
                    id: OptionId::new(id),
                    question_id,
                    text,
                    correct,
                });
            }
        }
        grouped
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: i32,
    quiz_id: i32,
    user_id: i32,
    submitted_at: DateTime<Utc>,
}

impl SubmissionRow {
    fn into_submission(self, answers: Vec<GradedAnswer>) -> Submission {
        Submission {
            id: SubmissionId::new(self.id),
            quiz_id: QuizId::new(self.quiz_id),
            user_id: UserId::new(self.user_id),
            submitted_at: self.submitted_at,
            answers,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GradedAnswerRow {
    question_id: i32,
    question_text: String,
    selected_option_id: i32,
    selected_option_text: String,
    correct: bool,
}

impl GradedAnswerRow {
    fn into_graded_answer(self) -> GradedAnswer {
        GradedAnswer {
            question_id: QuestionId::new(self.question_id),
            question_text: self.question_text,
            selected_option_id: OptionId::new(self.selected_option_id),
            selected_option_text: self.selected_option_text,
            correct: self.correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Answer, NewOption};
    use tokio_test::assert_err;

    fn row(question_id: i32, option: Option<(i32, bool)>) -> QuestionOptionRow {
        QuestionOptionRow {
            question_id,
            question_text: format!("question {question_id}"),
            option_id: option.map(|(id, _)| id),
            option_text: option.map(|(id, _)| format!("option {id}")),
            correct: option.map(|(_, correct)| correct),
        }
    }

    #[test]
    fn test_group_question_rows() {
        let grouped = QuestionOptionRow::group(
            QuizId::new(1),
            vec![
                row(1, Some((10, true))),
                row(1, Some((11, false))),
                row(2, None),
                row(3, Some((30, false))),
            ],
        );

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].options.len(), 2);
        assert!(grouped[0].options[0].correct);
        assert!(grouped[1].options.is_empty());
        assert_eq!(grouped[2].options[0].id, OptionId::new(30));
        assert_eq!(grouped[2].question.quiz_id, QuizId::new(1));
    }

    #[sqlx::test(migrations = "../../../database/course/migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unique_violation_is_duplicate_submission(pool: PgPool) {
        let repo = PgQuizRepository::new(pool.clone());
        sqlx::query("INSERT INTO courses (id, title) VALUES (10, 'Rust')")
            .execute(&pool)
            .await
            .unwrap();

        let quiz = repo
            .create_quiz(&NewQuiz {
                course_id: CourseId::new(10),
                title: "Ownership".into(),
            })
            .await
            .unwrap();
        let added = repo
            .add_question(&NewQuestion {
                quiz_id: quiz.id,
                text: "Who owns a moved value?".into(),
                options: vec![NewOption {
                    text: "The new binding".into(),
                    correct: true,
                }],
            })
            .await
            .unwrap();

        let submission = NewSubmission::new(
            quiz.id,
            UserId::new(7),
            vec![Answer {
                question_id: added.question.id,
                selected_option_id: added.options[0].id,
            }],
        );

        // The second insert skips any pre-check and meets the constraint
        repo.persist(&submission).await.unwrap();
        let err = assert_err!(repo.persist(&submission).await);
        assert!(matches!(err, QuizError::DuplicateSubmission));

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_submissions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, 1);
    }

    #[sqlx::test(migrations = "../../../database/course/migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_second_quiz_for_course_conflicts(pool: PgPool) {
        let repo = PgQuizRepository::new(pool.clone());
        let quiz = NewQuiz {
            course_id: CourseId::new(10),
            title: "Ownership".into(),
        };

        repo.create_quiz(&quiz).await.unwrap();
        let err = assert_err!(repo.create_quiz(&quiz).await);
        assert!(matches!(err, QuizError::QuizAlreadyExists));
    }
}
