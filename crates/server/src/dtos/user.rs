use crate::dtos::course::CourseResponse;
use chrono::NaiveDateTime;
use database::{entities::users, services::user::InstructorStats};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    /// "student" or "instructor"
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub role: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: Option<String>,
    pub bio: String,
    pub created_at: NaiveDateTime,
}

impl From<users::Model> for ProfileResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            role: user.role.to_string(),
            display_name: user.display_name,
            first_name: user.first_name,
            last_name: user.last_name,
            photo_url: user.photo_url,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorDashboardResponse {
    pub courses: Vec<CourseResponse>,
    /// Total enrollments across every taught course
    pub total_students: i64,
}

impl From<InstructorStats> for InstructorDashboardResponse {
    fn from(stats: InstructorStats) -> Self {
        Self {
            courses: stats.courses.into_iter().map(Into::into).collect(),
            total_students: stats.total_students,
        }
    }
}
