use chrono::NaiveDateTime;
use database::entities::reviews;
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub course_id: Uuid,

    /// Whole stars, 1 to 5; zero means the reviewer never picked a rating
    pub rating: i32,

    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

impl From<reviews::Model> for ReviewResponse {
    fn from(review: reviews::Model) -> Self {
        Self {
            id: review.id.to_string(),
            course_id: review.course_id.to_string(),
            student_id: review.student_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}
