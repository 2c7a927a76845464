use crate::entities::{courses, reviews};
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, prelude::Expr,
};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Error type for submitting a review
#[derive(Debug)]
pub enum ReviewError {
    /// Ratings are whole stars from 1 to 5; zero stars is a missing rating
    InvalidRating(i32),
    Database(DbErr),
}

impl Display for ReviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidRating(rating) => {
                write!(f, "Rating must be between 1 and 5 stars, got {rating}")
            }
            Self::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl From<DbErr> for ReviewError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}

pub struct ReviewService;

impl ReviewService {
    /// All reviews for a course, newest first
    pub async fn list_for_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Vec<reviews::Model>, DbErr> {
        reviews::Entity::find()
            .filter(reviews::Column::CourseId.eq(course_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .all(db)
            .await
    }

    /// Submit a review and refresh the course's denormalized rating
    ///
    /// Nothing stops a student from reviewing a course twice; the original
    /// system never enforced one-review-per-student and neither does this.
    pub async fn create(
        db: &DatabaseConnection,
        course_id: Uuid,
        student_id: &str,
        rating: i32,
        comment: String,
    ) -> Result<reviews::Model, ReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }

        let review = reviews::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            student_id: Set(student_id.to_owned()),
            rating: Set(rating),
            comment: Set(comment),
            created_at: Set(Utc::now().naive_utc()),
        };

        let review = reviews::Entity::insert(review).exec_with_returning(db).await?;

        Self::refresh_course_rating(db, course_id).await?;

        Ok(review)
    }

    /// Recompute the course's average rating and review count from scratch
    async fn refresh_course_rating(db: &DatabaseConnection, course_id: Uuid) -> Result<(), DbErr> {
        let ratings: Vec<i32> = reviews::Entity::find()
            .select_only()
            .column(reviews::Column::Rating)
            .filter(reviews::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(db)
            .await?;

        let review_count = ratings.len() as i32;
        let average = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<i32>() as f64 / ratings.len() as f64
        };

        courses::Entity::update_many()
            .col_expr(courses::Column::Rating, Expr::value(average))
            .col_expr(courses::Column::ReviewCount, Expr::value(review_count))
            .filter(courses::Column::Id.eq(course_id))
            .exec(db)
            .await?;

        Ok(())
    }
}
