//! Operation capability table
//!
//! Every guarded operation lists its allowed roles here. The match is
//! exhaustive, so adding an operation without deciding its roles fails to
//! compile.

use derive_more::Display;

use super::role::{Role, RoleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Operation {
    SubmitQuiz,
    ViewOwnSubmission,
    ViewUserSubmission,
    Enroll,
    Pay,
    UpdateEnrollmentStatus,
    CheckEnrollment,
    CourseReport,
    CreateQuiz,
    AddQuestion,
    ViewQuiz,
    ListUserEnrollments,
    ListCourseEnrollments,
}

impl Operation {
    pub const fn allowed_roles(&self) -> RoleSet {
        use Operation::*;
        use Role::*;
        match self {
            SubmitQuiz | ViewOwnSubmission | Enroll | Pay => RoleSet::of(&[Learner]),
            ViewUserSubmission | CourseReport | ListCourseEnrollments => RoleSet::of(&[Admin]),
            CreateQuiz | AddQuestion => RoleSet::of(&[Trainer]),
            // The orchestrator forwards the learner's credential when propagating
            UpdateEnrollmentStatus => RoleSet::of(&[Learner, Admin]),
            CheckEnrollment | ViewQuiz | ListUserEnrollments => {
                RoleSet::of(&[Learner, Trainer, Admin])
            }
        }
    }

    #[inline]
    pub const fn permits(&self, role: Role) -> bool {
        self.allowed_roles().contains(role)
    }
}
