//! PostgreSQL Repository Implementation

use crate::domain::entities::{Enrollment, EnrollmentStatus, NewEnrollment, PaidStatus};
use crate::domain::repository::EnrollmentRepository;
use crate::error::{EnrollmentError, EnrollmentResult};
use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{CourseId, EnrollmentId, UserId};
use sqlx::PgPool;

/// PostgreSQL-backed enrollment repository
#[derive(Clone)]
pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EnrollmentRepository for PgEnrollmentRepository {
    async fn find(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> EnrollmentResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, course_id, status, paid_status, enrolled_at
            FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            "#,
        )
        .bind(user_id.get())
        .bind(course_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EnrollmentRow::into_enrollment).transpose()
    }

    async fn exists_paid(&self, user_id: UserId, course_id: CourseId) -> EnrollmentResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM enrollments
                WHERE user_id = $1 AND course_id = $2 AND paid_status = $3
            )
            "#,
        )
        .bind(user_id.get())
        .bind(course_id.get())
        .bind(PaidStatus::Paid.code())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, enrollment: &NewEnrollment) -> EnrollmentResult<Enrollment> {
        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO enrollments (user_id, course_id, status, paid_status, enrolled_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(enrollment.user_id.get())
        .bind(enrollment.course_id.get())
        .bind(EnrollmentStatus::Enrolled.code())
        .bind(PaidStatus::Unpaid.code())
        .bind(enrollment.enrolled_at)
        .fetch_one(&self.pool)
        .await;

        let id = match inserted {
            Ok(id) => EnrollmentId::new(id),
            Err(e) if is_unique_violation(&e) => return Err(EnrollmentError::AlreadyEnrolled),
            Err(e) => return Err(e.into()),
        };

        Ok(Enrollment {
            id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            status: EnrollmentStatus::Enrolled,
            paid_status: PaidStatus::Unpaid,
            enrolled_at: enrollment.enrolled_at,
        })
    }

    async fn set_status(
        &self,
        enrollment_id: EnrollmentId,
        status: EnrollmentStatus,
    ) -> EnrollmentResult<()> {
        sqlx::query("UPDATE enrollments SET status = $1 WHERE id = $2")
            .bind(status.code())
            .bind(enrollment_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_paid_status(
        &self,
        enrollment_id: EnrollmentId,
        paid_status: PaidStatus,
    ) -> EnrollmentResult<()> {
        sqlx::query("UPDATE enrollments SET paid_status = $1 WHERE id = $2")
            .bind(paid_status.code())
            .bind(enrollment_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_by_course(&self, course_id: CourseId) -> EnrollmentResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, course_id, status, paid_status, enrolled_at
            FROM enrollments
            WHERE course_id = $1
            ORDER BY id
            "#,
        )
        .bind(course_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EnrollmentRow::into_enrollment).collect()
    }

    async fn list_by_user(&self, user_id: UserId) -> EnrollmentResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, course_id, status, paid_status, enrolled_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EnrollmentRow::into_enrollment).collect()
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i32,
    user_id: i32,
    course_id: i32,
    status: String,
    paid_status: String,
    enrolled_at: DateTime<Utc>,
}

impl EnrollmentRow {
    fn into_enrollment(self) -> EnrollmentResult<Enrollment> {
        let status = EnrollmentStatus::from_code(&self.status).ok_or_else(|| {
            EnrollmentError::Internal(format!("Unknown enrollment status: {}", self.status))
        })?;
        let paid_status = PaidStatus::from_code(&self.paid_status).ok_or_else(|| {
            EnrollmentError::Internal(format!("Unknown paid status: {}", self.paid_status))
        })?;

        Ok(Enrollment {
            id: EnrollmentId::new(self.id),
            user_id: UserId::new(self.user_id),
            course_id: CourseId::new(self.course_id),
            status,
            paid_status,
            enrolled_at: self.enrolled_at,
        })
    }
}
