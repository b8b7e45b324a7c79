//! Domain Services
//!
//! Scoring. Pure functions, no I/O.

use derive_more::Display;
use serde::Serialize;

/// Default pass mark, in percent (inclusive)
pub const PASS_THRESHOLD: f64 = 70.0;

/// Pass/fail verdict of a graded submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    /// Enrollment status this outcome is propagated as
    pub const fn enrollment_status(&self) -> &'static str {
        match self {
            Outcome::Passed => "PASSED",
            Outcome::Failed => "FAILED",
        }
    }
}

/// Result of grading a submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
    pub percentage: f64,
    pub passed: bool,
}

impl QuizScore {
    /// `percentage = 100 * correct / total`, or 0 for an empty submission.
    pub fn compute(correct: u32, total: u32, threshold: f64) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(correct) * 100.0 / f64::from(total)
        };

        Self {
            correct,
            total,
            percentage,
            passed: percentage >= threshold,
        }
    }

    /// Grade from the correctness of each answer
    pub fn from_answers<I>(answers: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let (correct, total) = answers
            .into_iter()
            .fold((0u32, 0u32), |(correct, total), is_correct| {
                (correct + u32::from(is_correct), total + 1)
            });
        Self::compute(correct, total, threshold)
    }

    pub fn outcome(&self) -> Outcome {
        if self.passed {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_correct_passes() {
        let score = QuizScore::from_answers([true, true], PASS_THRESHOLD);
        assert_eq!(score.correct, 2);
        assert_eq!(score.total, 2);
        assert_eq!(score.percentage, 100.0);
        assert_eq!(score.outcome(), Outcome::Passed);
    }

    #[test]
    fn test_half_correct_fails() {
        let score = QuizScore::from_answers([true, false], PASS_THRESHOLD);
        assert_eq!(score.correct, 1);
        assert_eq!(score.percentage, 50.0);
        assert_eq!(score.outcome(), Outcome::Failed);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let score = QuizScore::compute(7, 10, PASS_THRESHOLD);
        assert_eq!(score.percentage, 70.0);
        assert!(score.passed);

        let score = QuizScore::compute(2, 3, PASS_THRESHOLD);
        assert!(!score.passed);
    }

    #[test]
    fn test_empty_submission_is_zero() {
        let score = QuizScore::from_answers(std::iter::empty(), PASS_THRESHOLD);
        assert_eq!(score.total, 0);
        assert_eq!(score.percentage, 0.0);
        assert_eq!(score.outcome(), Outcome::Failed);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Passed.to_string(), "Passed");
        assert_eq!(Outcome::Failed.enrollment_status(), "FAILED");
    }
}
