use crate::entities::{courses, enrollments};
use chrono::Utc;
use models::{course::CourseStatus, enrollment::clamp_progress};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait, prelude::Expr, sea_query::ExprTrait,
};
use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result as FmtResult},
};
use uuid::Uuid;

/// Error type for the enroll operation
#[derive(Debug)]
pub enum EnrollError {
    /// The (student, course) pair already has an enrollment
    AlreadyEnrolled,
    /// The course does not exist or is not published
    CourseNotFound,
    Database(DbErr),
}

impl Display for EnrollError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::AlreadyEnrolled => write!(f, "Student is already enrolled in this course"),
            Self::CourseNotFound => write!(f, "Course not found or not published"),
            Self::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl From<DbErr> for EnrollError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}

/// One row of the student dashboard: an enrollment joined to its course
pub struct DashboardEntry {
    pub enrollment: enrollments::Model,
    pub course: courses::Model,
}

pub struct EnrollmentService;

impl EnrollmentService {
    pub async fn get(
        db: &DatabaseConnection,
        enrollment_id: Uuid,
    ) -> Result<Option<enrollments::Model>, DbErr> {
        enrollments::Entity::find_by_id(enrollment_id).one(db).await
    }

    /// Look up the enrollment for a (student, course) pair, if any
    pub async fn find_enrollment(
        db: &DatabaseConnection,
        student_id: &str,
        course_id: Uuid,
    ) -> Result<Option<enrollments::Model>, DbErr> {
        enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    /// Enroll a student into a published course
    ///
    /// Creates the enrollment at progress 0 with an empty completed-lesson
    /// set and both timestamps at "now", then bumps the course's denormalized
    /// enrollment count; both writes commit in one transaction so the counter
    /// never drifts from the rows. The pre-insert lookup gives a friendly
    /// error on the common path; the actual exclusivity guarantee is the
    /// unique index on (student_id, course_id), so a concurrent enroll that
    /// slips past the check still surfaces as `AlreadyEnrolled`.
    pub async fn enroll(
        db: &DatabaseConnection,
        student_id: &str,
        course_id: Uuid,
    ) -> Result<enrollments::Model, EnrollError> {
        let course = courses::Entity::find_by_id(course_id)
            .filter(courses::Column::Status.eq(CourseStatus::Published))
            .one(db)
            .await?
            .ok_or(EnrollError::CourseNotFound)?;

        if Self::find_enrollment(db, student_id, course_id).await?.is_some() {
            return Err(EnrollError::AlreadyEnrolled);
        }

        let now = Utc::now().naive_utc();
        let enrollment = enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            student_id: Set(student_id.to_owned()),
            instructor_id: Set(course.instructor_id),
            progress: Set(0),
            completed_lessons: Set(serde_json::json!([])),
            enrolled_at: Set(now),
            last_accessed_at: Set(now),
        };

        let txn = db.begin().await?;

        let enrollment = match enrollments::Entity::insert(enrollment)
            .exec_with_returning(&txn)
            .await
        {
            Ok(enrollment) => enrollment,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(EnrollError::AlreadyEnrolled);
            }
            Err(err) => return Err(err.into()),
        };

        courses::Entity::update_many()
            .col_expr(
                courses::Column::EnrollmentCount,
                Expr::col(courses::Column::EnrollmentCount).add(1),
            )
            .filter(courses::Column::Id.eq(course_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(enrollment)
    }

    /// Write a new progress value, clamped to [0, 100], and touch the
    /// last-accessed timestamp
    pub async fn record_progress(
        db: &DatabaseConnection,
        enrollment: enrollments::Model,
        new_progress: i32,
    ) -> Result<enrollments::Model, DbErr> {
        let mut active: enrollments::ActiveModel = enrollment.into();
        active.progress = Set(clamp_progress(new_progress));
        active.last_accessed_at = Set(Utc::now().naive_utc());
        active.update(db).await
    }

    /// Add a lesson to the completed set; re-completing a lesson is a no-op
    /// apart from the access timestamp
    pub async fn mark_lesson_complete(
        db: &DatabaseConnection,
        enrollment: enrollments::Model,
        lesson_id: &str,
    ) -> Result<enrollments::Model, DbErr> {
        let mut lessons = enrollment.lesson_ids();
        if !lessons.iter().any(|lesson| lesson == lesson_id) {
            lessons.push(lesson_id.to_owned());
        }

        let mut active: enrollments::ActiveModel = enrollment.into();
        active.completed_lessons = Set(serde_json::json!(lessons));
        active.last_accessed_at = Set(Utc::now().naive_utc());
        active.update(db).await
    }

    /// All of a student's enrollments, most recent first
    pub async fn list_for_student(
        db: &DatabaseConnection,
        student_id: &str,
    ) -> Result<Vec<enrollments::Model>, DbErr> {
        enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .order_by_desc(enrollments::Column::EnrolledAt)
            .all(db)
            .await
    }

    /// The student dashboard: each enrollment resolved to its course
    pub async fn student_dashboard(
        db: &DatabaseConnection,
        student_id: &str,
    ) -> Result<Vec<DashboardEntry>, DbErr> {
        let enrollments = Self::list_for_student(db, student_id).await?;

        if enrollments.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<Uuid> = enrollments.iter().map(|e| e.course_id).collect();
        let courses = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?;

        Ok(assemble_dashboard(enrollments, courses))
    }
}

/// Join enrollments to their courses, preserving enrollment order
///
/// An enrollment whose course does not resolve is dropped rather than
/// treated as an error.
fn assemble_dashboard(
    enrollments: Vec<enrollments::Model>,
    courses: Vec<courses::Model>,
) -> Vec<DashboardEntry> {
    let courses_by_id: HashMap<Uuid, courses::Model> =
        courses.into_iter().map(|course| (course.id, course)).collect();

    enrollments
        .into_iter()
        .filter_map(|enrollment| {
            courses_by_id
                .get(&enrollment.course_id)
                .cloned()
                .map(|course| DashboardEntry { enrollment, course })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use futures::executor::block_on;
    use models::course::{Category, Level};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn course(id: Uuid) -> courses::Model {
        courses::Model {
            id,
            title: "Test Course".to_owned(),
            description: None,
            instructor_id: "instructor-1".to_owned(),
            category: Category::Programming,
            level: Level::Beginner,
            status: CourseStatus::Published,
            price: 49.0,
            original_price: None,
            rating: 0.0,
            review_count: 0,
            enrollment_count: 0,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn enrollment(course_id: Uuid, progress: i32) -> enrollments::Model {
        enrollments::Model {
            id: Uuid::new_v4(),
            course_id,
            student_id: "student-1".to_owned(),
            instructor_id: "instructor-1".to_owned(),
            progress,
            completed_lessons: serde_json::json!([]),
            enrolled_at: timestamp(),
            last_accessed_at: timestamp(),
        }
    }

    #[test]
    fn test_assemble_dashboard_joins_in_enrollment_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let entries = assemble_dashboard(
            vec![enrollment(first, 45), enrollment(second, 100)],
            vec![course(second), course(first)],
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].course.id, first);
        assert_eq!(entries[0].enrollment.progress, 45);
        assert_eq!(entries[1].course.id, second);
    }

    #[test]
    fn test_assemble_dashboard_drops_unresolvable_courses() {
        let known = Uuid::new_v4();
        let deleted = Uuid::new_v4();

        let entries = assemble_dashboard(
            vec![enrollment(deleted, 10), enrollment(known, 20)],
            vec![course(known)],
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].course.id, known);
        assert_eq!(entries[0].enrollment.progress, 20);
    }

    #[test]
    fn test_enroll_twice_is_a_conflict() {
        let course_id = Uuid::new_v4();

        // course resolves, and the (student, course) pair already has a row
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course(course_id)]])
            .append_query_results([vec![enrollment(course_id, 30)]])
            .into_connection();

        let err =
            block_on(EnrollmentService::enroll(&db, "student-1", course_id)).unwrap_err();
        assert!(matches!(err, EnrollError::AlreadyEnrolled));
    }

    #[test]
    fn test_enroll_requires_a_published_course() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<courses::Model>::new()])
            .into_connection();

        let err =
            block_on(EnrollmentService::enroll(&db, "student-1", Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, EnrollError::CourseNotFound));
    }

    #[test]
    fn test_enroll_creates_at_zero_progress() {
        let course_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course(course_id)]])
            .append_query_results([Vec::<enrollments::Model>::new()])
            .append_query_results([vec![enrollment(course_id, 0)]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();

        let created = block_on(EnrollmentService::enroll(&db, "student-1", course_id)).unwrap();
        assert_eq!(created.progress, 0);
        assert!(created.lesson_ids().is_empty());
    }

    #[test]
    fn test_lesson_ids_tolerates_malformed_payload() {
        let mut row = enrollment(Uuid::new_v4(), 0);
        row.completed_lessons = serde_json::json!({ "unexpected": "shape" });
        assert!(row.lesson_ids().is_empty());

        row.completed_lessons = serde_json::json!(["lesson-1", "lesson-2"]);
        assert_eq!(row.lesson_ids(), vec!["lesson-1", "lesson-2"]);
    }
}
