use crate::entities::{courses, reviews, users};
use futures::try_join;
use models::course::CourseStatus;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

/// A course together with the collaborators the detail page renders
pub struct CourseDetail {
    pub course: courses::Model,
    pub instructor: Option<users::Model>,
    pub reviews: Vec<reviews::Model>,
}

pub struct CatalogService;

impl CatalogService {
    /// All discoverable courses, newest first
    ///
    /// Draft courses never leave this layer; filtering and sorting for the
    /// explore page happen in memory on top of this list.
    pub async fn list_published(db: &DatabaseConnection) -> Result<Vec<courses::Model>, DbErr> {
        courses::Entity::find()
            .filter(courses::Column::Status.eq(CourseStatus::Published))
            .order_by_desc(courses::Column::CreatedAt)
            .all(db)
            .await
    }

    /// Get a single course by id, regardless of status
    pub async fn get_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Option<courses::Model>, DbErr> {
        courses::Entity::find_by_id(course_id).one(db).await
    }

    /// Get a course with its instructor profile and reviews
    ///
    /// A dangling instructor id is tolerated; the detail view renders
    /// without the instructor card.
    pub async fn get_course_detail(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Option<CourseDetail>, DbErr> {
        let course = match Self::get_course(db, course_id).await? {
            Some(course) => course,
            None => return Ok(None),
        };

        let (instructor, reviews) = try_join!(
            users::Entity::find_by_id(course.instructor_id.clone()).one(db),
            reviews::Entity::find()
                .filter(reviews::Column::CourseId.eq(course_id))
                .order_by_desc(reviews::Column::CreatedAt)
                .all(db),
        )?;

        Ok(Some(CourseDetail { course, instructor, reviews }))
    }
}
