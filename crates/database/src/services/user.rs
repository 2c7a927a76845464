use crate::entities::{courses, users};
use chrono::Utc;
use models::course::Role;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Error type for provisioning a user profile
#[derive(Debug)]
pub enum ProfileError {
    /// A profile already exists for this identity-provider subject
    AlreadyExists,
    Database(DbErr),
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::AlreadyExists => write!(f, "A profile already exists for this account"),
            Self::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl From<DbErr> for ProfileError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}

/// What the instructor dashboard shows: taught courses and reach
pub struct InstructorStats {
    pub courses: Vec<courses::Model>,
    pub total_students: i64,
}

pub struct UserService;

impl UserService {
    pub async fn get_profile(
        db: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(user_id.to_owned()).one(db).await
    }

    /// Create the profile record for an authenticated subject
    ///
    /// The credentials live at the identity provider; this only stores the
    /// role and display fields chosen at signup. The subject id is the
    /// primary key, so signing up twice maps to `AlreadyExists`.
    pub async fn create_profile(
        db: &DatabaseConnection,
        user_id: &str,
        role: Role,
        first_name: String,
        last_name: String,
        photo_url: Option<String>,
        bio: String,
    ) -> Result<users::Model, ProfileError> {
        let profile = users::ActiveModel {
            id: Set(user_id.to_owned()),
            role: Set(role),
            display_name: Set(format!("{first_name} {last_name}")),
            first_name: Set(first_name),
            last_name: Set(last_name),
            photo_url: Set(photo_url),
            bio: Set(bio),
            created_at: Set(Utc::now().naive_utc()),
        };

        match users::Entity::insert(profile).exec_with_returning(db).await {
            Ok(profile) => Ok(profile),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ProfileError::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Taught courses (drafts included) plus the aggregate student count
    pub async fn instructor_stats(
        db: &DatabaseConnection,
        instructor_id: &str,
    ) -> Result<InstructorStats, DbErr> {
        let courses = courses::Entity::find()
            .filter(courses::Column::InstructorId.eq(instructor_id))
            .order_by_desc(courses::Column::CreatedAt)
            .all(db)
            .await?;

        let total_students = courses
            .iter()
            .map(|course| i64::from(course.enrollment_count))
            .sum();

        Ok(InstructorStats { courses, total_students })
    }
}
