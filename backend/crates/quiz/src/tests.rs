//! Unit tests for quiz crate
//! Saga paths run against in-memory fakes; peer outages go through the real
//! remote caller with a scripted transport.

#[cfg(test)]
mod fakes {
    use crate::domain::entities::{
        GradedAnswer, NewQuestion, NewQuiz, NewSubmission, Question, QuestionWithOptions, Quiz,
        QuizOption, Submission,
    };
    use crate::domain::peers::{EnrollmentAuthority, StatusUpdate, UserDirectory, UserProfile};
    use crate::domain::repository::{QuizRepository, SubmissionRepository};
    use crate::error::{QuizError, QuizResult};
    use auth::{Authorized, Principal, Role};
    use kernel::id::{CourseId, OptionId, QuestionId, QuizId, SubmissionId, UserId};
    use platform::client::BearerToken;
    use platform::remote::RemoteResult;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const LEARNER: UserId = UserId::new(7);
    pub const QUIZ: QuizId = QuizId::new(1);
    pub const COURSE: CourseId = CourseId::new(10);
    pub const OTHER_QUIZ: QuizId = QuizId::new(2);

    pub const Q1: QuestionId = QuestionId::new(100);
    pub const Q1_RIGHT: OptionId = OptionId::new(1000);
    pub const Q1_WRONG: OptionId = OptionId::new(1001);
    pub const Q2: QuestionId = QuestionId::new(200);
    pub const Q2_RIGHT: OptionId = OptionId::new(2000);
    pub const Q2_WRONG: OptionId = OptionId::new(2001);
    pub const FOREIGN_Q: QuestionId = QuestionId::new(300);

    /// Course with no quiz yet
    pub const BARE_COURSE: CourseId = CourseId::new(30);

    pub struct InMemoryStore {
        courses: Vec<CourseId>,
        quizzes: Mutex<Vec<Quiz>>,
        questions: Mutex<Vec<Question>>,
        options: Mutex<Vec<QuizOption>>,
        pub submissions: Mutex<Vec<Submission>>,
        /// Simulates a concurrent writer: the pre-check misses rows that the
        /// uniqueness constraint still catches.
        pub blind_exists: bool,
        pub persist_calls: AtomicUsize,
    }

    impl InMemoryStore {
        /// Quiz 1 (course 10) with two questions, each with one correct
        /// option; quiz 2 (course 20) with one question.
        pub fn seeded() -> Self {
            let question = |id, quiz_id, text: &str| Question {
                id,
                quiz_id,
                text: text.into(),
            };
            let option = |id, question_id, text: &str, correct| QuizOption {
                id,
                question_id,
                text: text.into(),
                correct,
            };

            Self {
                courses: vec![COURSE, CourseId::new(20), BARE_COURSE],
                quizzes: Mutex::new(vec![
                    Quiz {
                        id: QUIZ,
                        course_id: COURSE,
                        title: "Ownership".into(),
                    },
                    Quiz {
                        id: OTHER_QUIZ,
                        course_id: CourseId::new(20),
                        title: "Lifetimes".into(),
                    },
                ]),
                questions: Mutex::new(vec![
                    question(Q1, QUIZ, "Who owns a moved value?"),
                    question(Q2, QUIZ, "Can two &mut borrows overlap?"),
                    question(FOREIGN_Q, OTHER_QUIZ, "What does 'static mean?"),
                ]),
                options: Mutex::new(vec![
                    option(Q1_RIGHT, Q1, "The new binding", true),
                    option(Q1_WRONG, Q1, "Both bindings", false),
                    option(Q2_RIGHT, Q2, "No", true),
                    option(Q2_WRONG, Q2, "Yes", false),
                    option(OptionId::new(3000), FOREIGN_Q, "Lives forever", true),
                ]),
                submissions: Mutex::new(Vec::new()),
                blind_exists: false,
                persist_calls: AtomicUsize::new(0),
            }
        }

        pub fn blind() -> Self {
            Self {
                blind_exists: true,
                ..Self::seeded()
            }
        }

        pub fn stored(&self) -> usize {
            self.submissions.lock().unwrap().len()
        }
    }

    impl QuizRepository for InMemoryStore {
        async fn find_quiz(&self, quiz_id: QuizId) -> QuizResult<Option<Quiz>> {
            Ok(self.quizzes.lock().unwrap().iter().find(|q| q.id == quiz_id).cloned())
        }

        async fn find_quiz_by_course(&self, course_id: CourseId) -> QuizResult<Option<Quiz>> {
            Ok(self
                .quizzes
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.course_id == course_id)
                .cloned())
        }

        async fn course_exists(&self, course_id: CourseId) -> QuizResult<bool> {
            Ok(self.courses.contains(&course_id))
        }

        async fn create_quiz(&self, quiz: &NewQuiz) -> QuizResult<Quiz> {
            let mut quizzes = self.quizzes.lock().unwrap();
            if quizzes.iter().any(|q| q.course_id == quiz.course_id) {
                return Err(QuizError::QuizAlreadyExists);
            }
            let created = Quiz {
                id: QuizId::new(quizzes.len() as i32 + 1),
                course_id: quiz.course_id,
                title: quiz.title.clone(),
            };
            quizzes.push(created.clone());
            Ok(created)
        }

        async fn add_question(&self, question: &NewQuestion) -> QuizResult<QuestionWithOptions> {
            let mut questions = self.questions.lock().unwrap();
            let mut options = self.options.lock().unwrap();

            let stored = Question {
                id: QuestionId::new(500 + questions.len() as i32),
                quiz_id: question.quiz_id,
                text: question.text.clone(),
            };
            let added: Vec<QuizOption> = question
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| QuizOption {
                    id: OptionId::new(5000 + (options.len() + i) as i32),
                    question_id: stored.id,
                    text: option.text.clone(),
                    correct: option.correct,
                })
                .collect();

            questions.push(stored.clone());
            options.extend(added.iter().cloned());
            Ok(QuestionWithOptions {
                question: stored,
                options: added,
            })
        }

        async fn list_questions(&self, quiz_id: QuizId) -> QuizResult<Vec<QuestionWithOptions>> {
            let questions = self.questions.lock().unwrap();
            let options = self.options.lock().unwrap();
            Ok(questions
                .iter()
                .filter(|q| q.quiz_id == quiz_id)
                .map(|q| QuestionWithOptions {
                    question: q.clone(),
                    options: options
                        .iter()
                        .filter(|o| o.question_id == q.id)
                        .cloned()
                        .collect(),
                })
                .collect())
        }
    }

    impl SubmissionRepository for InMemoryStore {
        async fn exists(&self, user_id: UserId, quiz_id: QuizId) -> QuizResult<bool> {
            if self.blind_exists {
                return Ok(false);
            }
            Ok(self
                .submissions
                .lock()
                .unwrap()
                .iter()
                .any(|s| s.user_id == user_id && s.quiz_id == quiz_id))
        }

        async fn persist(&self, submission: &NewSubmission) -> QuizResult<Submission> {
            self.persist_calls.fetch_add(1, Ordering::SeqCst);

            let questions = self.questions.lock().unwrap();
            let options = self.options.lock().unwrap();
            let mut graded = Vec::new();
            for answer in &submission.answers {
                let question = questions
                    .iter()
                    .find(|q| q.id == answer.question_id && q.quiz_id == submission.quiz_id)
                    .ok_or(QuizError::QuestionNotFound(answer.question_id))?;
                let option = options
                    .iter()
                    .find(|o| {
                        o.id == answer.selected_option_id && o.question_id == answer.question_id
                    })
                    .ok_or(QuizError::OptionNotFound(answer.selected_option_id))?;
                graded.push(GradedAnswer::new(question, option));
            }

            let mut rows = self.submissions.lock().unwrap();
            if rows
                .iter()
                .any(|s| s.user_id == submission.user_id && s.quiz_id == submission.quiz_id)
            {
                return Err(QuizError::DuplicateSubmission);
            }

            let stored = Submission {
                id: SubmissionId::new(rows.len() as i32 + 1),
                quiz_id: submission.quiz_id,
                user_id: submission.user_id,
                submitted_at: submission.submitted_at,
                answers: graded,
            };
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn find_latest_by_user(&self, user_id: UserId) -> QuizResult<Option<Submission>> {
            Ok(self
                .submissions
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.user_id == user_id)
                .max_by_key(|s| (s.submitted_at, s.id))
                .cloned())
        }
    }

    pub struct FakeUsers {
        result: RemoteResult<UserProfile>,
        pub calls: AtomicUsize,
    }

    impl FakeUsers {
        pub fn returning(result: RemoteResult<UserProfile>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn present() -> Self {
            Self::returning(RemoteResult::Success(UserProfile {
                id: LEARNER,
                name: "Ada".into(),
                email: "ada@example.com".into(),
                role: "LEARNER".into(),
            }))
        }
    }

    impl UserDirectory for FakeUsers {
        async fn fetch_user(
            &self,
            _user_id: UserId,
            _bearer: &BearerToken,
        ) -> RemoteResult<UserProfile> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    pub struct FakeEnrollments {
        enrolled: RemoteResult<bool>,
        update: RemoteResult<()>,
        pub checks: AtomicUsize,
        pub updates: Mutex<Vec<StatusUpdate>>,
    }

    impl FakeEnrollments {
        pub fn new(enrolled: RemoteResult<bool>, update: RemoteResult<()>) -> Self {
            Self {
                enrolled,
                update,
                checks: AtomicUsize::new(0),
                updates: Mutex::new(Vec::new()),
            }
        }

        pub fn paid() -> Self {
            Self::new(RemoteResult::Success(true), RemoteResult::Success(()))
        }
    }

    impl EnrollmentAuthority for FakeEnrollments {
        async fn is_enrolled(
            &self,
            _user_id: UserId,
            _course_id: CourseId,
            _bearer: &BearerToken,
        ) -> RemoteResult<bool> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.enrolled.clone()
        }

        async fn update_status(
            &self,
            update: &StatusUpdate,
            _bearer: &BearerToken,
        ) -> RemoteResult<()> {
            self.updates.lock().unwrap().push(update.clone());
            self.update.clone()
        }
    }

    pub fn learner() -> Authorized {
        Authorized {
            principal: Principal {
                subject: "ada@example.com".into(),
                user_id: LEARNER,
                role: Role::Learner,
            },
            token: BearerToken::new("learner-token"),
        }
    }
}

#[cfg(test)]
mod submit_quiz_tests {
    use super::fakes::*;
    use crate::application::config::QuizConfig;
    use crate::application::submit_quiz::{SubmitQuizInput, SubmitQuizUseCase};
    use crate::domain::entities::Answer;
    use crate::domain::peers::UserProfile;
    use crate::domain::saga::SagaStage;
    use crate::domain::services::Outcome;
    use crate::error::QuizError;
    use crate::infra::peers::HttpEnrollmentAuthority;
    use kernel::id::{OptionId, QuizId};
    use platform::remote::{Dependency, RemoteCaller, RemoteResult, RetryPolicy};
    use platform::transport::{RemoteRequest, RemoteResponse, Transport, TransportError};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::{assert_err, assert_ok};

    fn use_case<E>(
        store: &Arc<InMemoryStore>,
        users: &Arc<FakeUsers>,
        enrollments: &Arc<E>,
    ) -> SubmitQuizUseCase<InMemoryStore, InMemoryStore, FakeUsers, E>
    where
        E: crate::domain::peers::EnrollmentAuthority + Send + Sync + 'static,
    {
        SubmitQuizUseCase::new(
            store.clone(),
            store.clone(),
            users.clone(),
            enrollments.clone(),
            Arc::new(QuizConfig::default()),
        )
    }

    fn input(answers: &[(kernel::id::QuestionId, OptionId)]) -> SubmitQuizInput {
        SubmitQuizInput {
            quiz_id: QUIZ,
            answers: answers
                .iter()
                .map(|&(question_id, selected_option_id)| Answer {
                    question_id,
                    selected_option_id,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_all_correct_passes_and_propagates() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());

        let output = assert_ok!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT), (Q2, Q2_RIGHT)]), &learner())
                .await
        );

        assert_eq!(output.score.correct, 2);
        assert_eq!(output.score.total, 2);
        assert_eq!(output.score.percentage, 100.0);
        assert_eq!(output.score.outcome(), Outcome::Passed);

        assert_eq!(output.propagation.await.unwrap(), SagaStage::StatusPropagated);
        let updates = enrollments.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].status, "PASSED");
        assert_eq!(updates[0].course_id, COURSE);
        assert_eq!(updates[0].user_id, LEARNER);
    }

    #[tokio::test]
    async fn test_half_correct_fails() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());

        let output = assert_ok!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT), (Q2, Q2_WRONG)]), &learner())
                .await
        );

        assert_eq!(output.score.correct, 1);
        assert_eq!(output.score.total, 2);
        assert_eq!(output.score.percentage, 50.0);
        assert_eq!(output.score.outcome(), Outcome::Failed);

        output.propagation.await.unwrap();
        assert_eq!(enrollments.updates.lock().unwrap()[0].status, "FAILED");
    }

    #[tokio::test]
    async fn test_empty_submission_scores_zero() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());

        let output = assert_ok!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[]), &learner())
                .await
        );

        assert_eq!(output.score.total, 0);
        assert_eq!(output.score.percentage, 0.0);
        assert_eq!(output.score.outcome(), Outcome::Failed);
    }

    #[tokio::test]
    async fn test_user_not_found_never_asks_enrollment() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::returning(RemoteResult::NotFound));
        let enrollments = Arc::new(FakeEnrollments::paid());

        let err = assert_err!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT)]), &learner())
                .await
        );

        assert!(matches!(err, QuizError::UserNotFound(id) if id == LEARNER));
        assert_eq!(enrollments.checks.load(Ordering::SeqCst), 0);
        assert_eq!(store.stored(), 0);
    }

    #[tokio::test]
    async fn test_user_service_unavailable() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::returning(RemoteResult::Unavailable));
        let enrollments = Arc::new(FakeEnrollments::paid());

        let err = assert_err!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT)]), &learner())
                .await
        );

        assert!(matches!(err, QuizError::DependencyUnavailable(Dependency::User)));
        assert_eq!(err.to_app_error().message(), "User service unavailable");
        assert_eq!(enrollments.checks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sentinel_profile_is_not_treated_as_found() {
        // A real profile with id 0 is still a success; only the tag decides.
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::returning(RemoteResult::Success(
            <UserProfile as platform::remote::Sentinel>::sentinel(),
        )));
        let enrollments = Arc::new(FakeEnrollments::paid());

        assert_ok!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT)]), &learner())
                .await
        );
    }

    #[tokio::test]
    async fn test_unknown_quiz() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());

        let mut request = input(&[]);
        request.quiz_id = QuizId::new(99);

        let err = assert_err!(
            use_case(&store, &users, &enrollments)
                .execute(request, &learner())
                .await
        );
        assert!(matches!(err, QuizError::QuizNotFound));
        assert_eq!(enrollments.checks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_not_enrolled_or_unpaid() {
        for enrolled in [RemoteResult::Success(false), RemoteResult::NotFound] {
            let store = Arc::new(InMemoryStore::seeded());
            let users = Arc::new(FakeUsers::present());
            let enrollments =
                Arc::new(FakeEnrollments::new(enrolled, RemoteResult::Success(())));

            let err = assert_err!(
                use_case(&store, &users, &enrollments)
                    .execute(input(&[(Q1, Q1_RIGHT)]), &learner())
                    .await
            );
            assert!(matches!(err, QuizError::NotEnrolled));
            assert_eq!(store.stored(), 0);
        }
    }

    #[tokio::test]
    async fn test_enrollment_unavailable_does_not_persist() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::new(
            RemoteResult::Unavailable,
            RemoteResult::Success(()),
        ));

        let err = assert_err!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT)]), &learner())
                .await
        );

        assert!(matches!(err, QuizError::DependencyUnavailable(Dependency::Enrollment)));
        assert_eq!(err.to_app_error().message(), "Enrollment service unavailable");
        assert_eq!(store.persist_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.stored(), 0);
    }

    #[tokio::test]
    async fn test_second_submission_conflicts() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());
        let use_case = use_case(&store, &users, &enrollments);

        assert_ok!(use_case.execute(input(&[(Q1, Q1_RIGHT)]), &learner()).await);
        let err = assert_err!(use_case.execute(input(&[(Q1, Q1_WRONG)]), &learner()).await);

        assert!(matches!(err, QuizError::DuplicateSubmission));
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
        assert_eq!(store.stored(), 1);
        // The rejected attempt never reached storage
        assert_eq!(store.persist_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_race_past_precheck_is_conflict_not_500() {
        let store = Arc::new(InMemoryStore::blind());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());
        let use_case = use_case(&store, &users, &enrollments);

        assert_ok!(use_case.execute(input(&[(Q1, Q1_RIGHT)]), &learner()).await);
        let err = assert_err!(use_case.execute(input(&[(Q1, Q1_RIGHT)]), &learner()).await);

        assert!(matches!(err, QuizError::DuplicateSubmission));
        assert_eq!(store.stored(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_submits_store_one() {
        let store = Arc::new(InMemoryStore::blind());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());
        let use_case = use_case(&store, &users, &enrollments);
        let caller = learner();

        let (first, second) = tokio::join!(
            use_case.execute(input(&[(Q1, Q1_RIGHT)]), &caller),
            use_case.execute(input(&[(Q1, Q1_WRONG)]), &caller),
        );

        let (winner, loser) = match (first, second) {
            (Ok(winner), Err(loser)) | (Err(loser), Ok(winner)) => (winner, loser),
            (first, second) => panic!("expected one winner, got {first:?} and {second:?}"),
        };
        assert!(matches!(loser, QuizError::DuplicateSubmission));
        assert_eq!(store.stored(), 1);
        assert_eq!(store.persist_calls.load(Ordering::SeqCst), 2);

        // Only the stored attempt propagates a status
        winner.propagation.await.unwrap();
        assert_eq!(enrollments.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_question_from_another_quiz_writes_nothing() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());

        let err = assert_err!(
            use_case(&store, &users, &enrollments)
                .execute(
                    input(&[(Q1, Q1_RIGHT), (FOREIGN_Q, OptionId::new(3000))]),
                    &learner()
                )
                .await
        );

        assert!(matches!(err, QuizError::QuestionNotFound(q) if q == FOREIGN_Q));
        assert_eq!(store.stored(), 0);
        assert!(enrollments.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_option_from_another_question_writes_nothing() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::paid());

        let err = assert_err!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q2_RIGHT)]), &learner())
                .await
        );

        assert!(matches!(err, QuizError::OptionNotFound(o) if o == Q2_RIGHT));
        assert_eq!(store.stored(), 0);
    }

    #[tokio::test]
    async fn test_propagation_failure_keeps_result() {
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());
        let enrollments = Arc::new(FakeEnrollments::new(
            RemoteResult::Success(true),
            RemoteResult::Unavailable,
        ));

        let output = assert_ok!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT), (Q2, Q2_RIGHT)]), &learner())
                .await
        );

        assert_eq!(output.score.outcome(), Outcome::Passed);
        assert_eq!(output.propagation.await.unwrap(), SagaStage::PropagationFailed);
        assert_eq!(store.stored(), 1);
    }

    /// Transport whose every attempt fails at the connection level
    #[derive(Clone)]
    struct DownTransport {
        attempts: Arc<AtomicUsize>,
    }

    impl Transport for DownTransport {
        async fn send(&self, request: &RemoteRequest) -> Result<RemoteResponse, TransportError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Request {
                path: request.path.clone(),
                message: "connection refused".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_unreachable_enrollment_service_exhausts_retries() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let transport = DownTransport {
            attempts: attempts.clone(),
        };
        let enrollments = Arc::new(HttpEnrollmentAuthority::new(RemoteCaller::new(
            Dependency::Enrollment,
            transport,
            RetryPolicy::immediate(3),
        )));
        let store = Arc::new(InMemoryStore::seeded());
        let users = Arc::new(FakeUsers::present());

        let err = assert_err!(
            use_case(&store, &users, &enrollments)
                .execute(input(&[(Q1, Q1_RIGHT)]), &learner())
                .await
        );

        assert!(matches!(err, QuizError::DependencyUnavailable(Dependency::Enrollment)));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(store.persist_calls.load(Ordering::SeqCst), 0);
    }
}

#[cfg(test)]
mod submission_query_tests {
    use super::fakes::*;
    use crate::application::config::QuizConfig;
    use crate::application::submission_query::SubmissionQueryUseCase;
    use crate::domain::entities::{Answer, NewSubmission};
    use crate::domain::repository::SubmissionRepository;
    use crate::domain::services::Outcome;
    use crate::error::QuizError;
    use kernel::id::UserId;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_latest_submission_is_regraded() {
        let store = Arc::new(InMemoryStore::seeded());
        store
            .persist(&NewSubmission::new(
                QUIZ,
                LEARNER,
                vec![
                    Answer {
                        question_id: Q1,
                        selected_option_id: Q1_RIGHT,
                    },
                    Answer {
                        question_id: Q2,
                        selected_option_id: Q2_WRONG,
                    },
                ],
            ))
            .await
            .unwrap();

        let use_case = SubmissionQueryUseCase::new(store, Arc::new(QuizConfig::default()));
        let report = use_case.latest_for(LEARNER).await.unwrap();

        assert_eq!(report.submission.answers.len(), 2);
        assert!(report.submission.answers[0].correct);
        assert!(!report.submission.answers[1].correct);
        assert_eq!(report.submission.answers[1].selected_option_text, "Yes");
        assert_eq!(report.score.percentage, 50.0);
        assert_eq!(report.score.outcome(), Outcome::Failed);
    }

    #[tokio::test]
    async fn test_no_submission_is_not_found() {
        let store = Arc::new(InMemoryStore::seeded());
        let use_case = SubmissionQueryUseCase::new(store, Arc::new(QuizConfig::default()));

        let err = use_case.latest_for(UserId::new(404)).await.unwrap_err();
        assert!(matches!(err, QuizError::NoSubmissions));
        assert_eq!(
            err.to_app_error().message(),
            "No quiz submissions found for this user"
        );
    }
}

#[cfg(test)]
mod quiz_authoring_tests {
    use super::fakes::*;
    use crate::application::quiz_authoring::{AddQuestionUseCase, CreateQuizUseCase};
    use crate::application::quiz_content::QuizContentUseCase;
    use crate::domain::entities::{NewOption, NewQuestion, NewQuiz};
    use crate::error::QuizError;
    use kernel::id::{CourseId, QuizId};
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn new_quiz(course_id: CourseId, title: &str) -> NewQuiz {
        NewQuiz {
            course_id,
            title: title.into(),
        }
    }

    #[tokio::test]
    async fn test_create_quiz_for_bare_course() {
        let store = Arc::new(InMemoryStore::seeded());

        let quiz = assert_ok!(
            CreateQuizUseCase::new(store.clone())
                .execute(new_quiz(BARE_COURSE, "  Traits  "))
                .await
        );

        assert_eq!(quiz.course_id, BARE_COURSE);
        assert_eq!(quiz.title, "Traits");
    }

    #[tokio::test]
    async fn test_second_quiz_for_course_conflicts() {
        let store = Arc::new(InMemoryStore::seeded());

        let err = assert_err!(
            CreateQuizUseCase::new(store)
                .execute(new_quiz(COURSE, "Again"))
                .await
        );
        assert!(matches!(err, QuizError::QuizAlreadyExists));
    }

    #[tokio::test]
    async fn test_quiz_for_unknown_course() {
        let store = Arc::new(InMemoryStore::seeded());

        let err = assert_err!(
            CreateQuizUseCase::new(store)
                .execute(new_quiz(CourseId::new(404), "Ghost"))
                .await
        );
        assert!(matches!(err, QuizError::CourseNotFound(c) if c == CourseId::new(404)));
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let store = Arc::new(InMemoryStore::seeded());

        let err = assert_err!(
            CreateQuizUseCase::new(store)
                .execute(new_quiz(BARE_COURSE, "   "))
                .await
        );
        assert!(matches!(err, QuizError::EmptyTitle));
    }

    #[tokio::test]
    async fn test_added_question_shows_up_in_content() {
        let store = Arc::new(InMemoryStore::seeded());

        let added = assert_ok!(
            AddQuestionUseCase::new(store.clone())
                .execute(NewQuestion {
                    quiz_id: QUIZ,
                    text: "Is Rc Send?".into(),
                    options: vec![
                        NewOption {
                            text: "Yes".into(),
                            correct: false,
                        },
                        NewOption {
                            text: "No".into(),
                            correct: true,
                        },
                    ],
                })
                .await
        );
        assert_eq!(added.options.len(), 2);

        let content = assert_ok!(QuizContentUseCase::new(store).for_course(COURSE).await);
        assert_eq!(content.quiz.id, QUIZ);
        assert_eq!(content.questions.len(), 3);
        let last = &content.questions[2];
        assert_eq!(last.question.text, "Is Rc Send?");
        assert!(last.options[1].correct);
    }

    #[tokio::test]
    async fn test_question_for_unknown_quiz() {
        let store = Arc::new(InMemoryStore::seeded());

        let err = assert_err!(
            AddQuestionUseCase::new(store)
                .execute(NewQuestion {
                    quiz_id: QuizId::new(99),
                    text: "Orphan".into(),
                    options: Vec::new(),
                })
                .await
        );
        assert!(matches!(err, QuizError::QuizNotFound));
    }

    #[tokio::test]
    async fn test_content_for_course_without_quiz() {
        let store = Arc::new(InMemoryStore::seeded());

        let err = assert_err!(QuizContentUseCase::new(store).for_course(BARE_COURSE).await);
        assert!(matches!(err, QuizError::NoQuizForCourse(c) if c == BARE_COURSE));
        assert_eq!(
            err.to_app_error().message(),
            format!("Quiz not found for course ID: {}", BARE_COURSE)
        );
    }
}

#[cfg(test)]
mod router_tests {
    use super::fakes::*;
    use crate::application::config::QuizConfig;
    use crate::presentation::handlers::QuizAppState;
    use crate::presentation::router::quiz_router;
    use auth::{AuthConfig, AuthorizationGate, TokenVerifier};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tower::ServiceExt;

    fn app() -> axum::Router {
        let config = AuthConfig::development();
        quiz_router(QuizAppState {
            repo: Arc::new(InMemoryStore::seeded()),
            users: Arc::new(FakeUsers::present()),
            enrollments: Arc::new(FakeEnrollments::paid()),
            gate: Arc::new(AuthorizationGate::new(Arc::new(TokenVerifier::new(&config)))),
            config: Arc::new(QuizConfig::default()),
        })
    }

    fn token(role: &str) -> String {
        let exp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() + 600;
        let claims = serde_json::json!({
            "sub": "ada@example.com",
            "id": LEARNER.get().to_string(),
            "roles": [role],
            "exp": exp,
        });
        let secret = AuthConfig::development().jwt_secret;
        encode(&Header::default(), &claims, &EncodingKey::from_secret(&secret)).unwrap()
    }

    fn submit(bearer: Option<String>, path_quiz: i32) -> Request<Body> {
        let body = serde_json::json!({
            "quizId": QUIZ.get(),
            "answers": [
                { "questionId": Q1.get(), "selectedOptionId": Q1_RIGHT.get() },
                { "questionId": Q2.get(), "selectedOptionId": Q2_RIGHT.get() },
            ],
        });
        let mut builder = Request::builder()
            .method("POST")
            .uri(format!("/{path_quiz}/submit"))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(bearer) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_submit_without_token_is_unauthorized() {
        let response = app().oneshot(submit(None, QUIZ.get())).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    fn raw_post(uri: &str, bearer: Option<String>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(bearer) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    fn get(uri: &str, bearer: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(bearer) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_untokened_malformed_body_is_unauthorized() {
        let response = app()
            .oneshot(raw_post("/1/submit", None, r#"{"quizId":"one","answers":5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_untokened_bad_path_is_unauthorized() {
        let response = app()
            .oneshot(raw_post("/abc/submit", None, r#"{"quizId":1,"answers":[]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_learner_malformed_body_is_rejected_after_auth() {
        let response = app()
            .oneshot(raw_post(
                "/1/submit",
                Some(token("LEARNER")),
                r#"{"quizId":"one","answers":5}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_quiz_as_trainer() {
        let body = serde_json::json!({ "courseId": BARE_COURSE.get(), "title": "Traits" });
        let response = app()
            .oneshot(raw_post("/create", Some(token("TRAINER")), &body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Quiz Created Successfully");
    }

    #[tokio::test]
    async fn test_create_quiz_as_learner_is_forbidden() {
        let body = serde_json::json!({ "courseId": BARE_COURSE.get(), "title": "Traits" });
        let response = app()
            .oneshot(raw_post("/create", Some(token("LEARNER")), &body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_duplicate_quiz_conflicts() {
        let body = serde_json::json!({ "courseId": COURSE.get(), "title": "Again" });
        let response = app()
            .oneshot(raw_post("/create", Some(token("TRAINER")), &body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_add_question_as_trainer() {
        let body = serde_json::json!({
            "quizId": QUIZ.get(),
            "text": "Is Rc Send?",
            "options": [{ "text": "No", "correct": true }, { "text": "Yes" }],
        });
        let response = app()
            .oneshot(raw_post("/questions", Some(token("TRAINER")), &body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json(response).await["message"], "Question added");
    }

    #[tokio::test]
    async fn test_quiz_content_hides_correctness() {
        let response = app()
            .oneshot(get(&format!("/get/{}", COURSE.get()), Some(token("LEARNER"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["quiz"]["id"], QUIZ.get());
        let questions = body["quiz"]["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 2);
        let option = &questions[0]["options"][0];
        assert_eq!(option["text"], "The new binding");
        assert!(option.get("correct").is_none());
    }

    #[tokio::test]
    async fn test_quiz_content_requires_token() {
        let response = app()
            .oneshot(get(&format!("/get/{}", COURSE.get()), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submit_as_admin_is_forbidden() {
        let response = app()
            .oneshot(submit(Some(token("ADMIN")), QUIZ.get()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_submit_as_learner() {
        let response = app()
            .oneshot(submit(Some(token("LEARNER")), QUIZ.get()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["correctAnswers"], 2);
        assert_eq!(body["totalQuestions"], 2);
        assert_eq!(body["percentage"], 100.0);
        assert_eq!(body["result"], "Passed");
    }

    #[tokio::test]
    async fn test_path_and_body_quiz_must_match() {
        let response = app()
            .oneshot(submit(Some(token("LEARNER")), 2))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_user_submission_requires_admin() {
        let request = Request::builder()
            .uri(format!("/submissions/{}", LEARNER.get()))
            .header(header::AUTHORIZATION, format!("Bearer {}", token("LEARNER")))
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_own_submission_missing_is_not_found() {
        let request = Request::builder()
            .uri("/submissions/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("LEARNER")))
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
