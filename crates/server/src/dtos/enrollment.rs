use crate::dtos::course::CourseResponse;
use chrono::NaiveDateTime;
use database::{entities::enrollments, services::enrollment::DashboardEntry};
use models::enrollment::{EnrollmentStatus, MAX_PROGRESS};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub course_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProgressUpdateRequest {
    /// New progress percentage; values outside [0, 100] are clamped
    pub progress: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub progress: i32,
    /// not-started | in-progress | completed
    pub status: String,
    pub completed_lessons: Vec<String>,
    /// Completion unlocks the certificate affordance
    pub certificate_available: bool,
    pub enrolled_at: NaiveDateTime,
    pub last_accessed_at: NaiveDateTime,
}

impl From<enrollments::Model> for EnrollmentResponse {
    fn from(enrollment: enrollments::Model) -> Self {
        let status = EnrollmentStatus::from_progress(enrollment.progress);
        let completed_lessons = enrollment.lesson_ids();

        Self {
            id: enrollment.id.to_string(),
            course_id: enrollment.course_id.to_string(),
            student_id: enrollment.student_id,
            progress: enrollment.progress,
            status: status.to_string(),
            completed_lessons,
            certificate_available: status.is_completed(),
            enrolled_at: enrollment.enrolled_at,
            last_accessed_at: enrollment.last_accessed_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct DashboardQueryParams {
    /// One of: all, in-progress, completed
    pub tab: Option<String>,
}

/// The stat cards at the top of the student dashboard, always computed over
/// every enrollment regardless of the selected tab
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub enrolled: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl DashboardStats {
    pub fn from_progress_values(values: impl Iterator<Item = i32>) -> Self {
        let mut stats = Self { enrolled: 0, in_progress: 0, completed: 0 };

        for progress in values {
            stats.enrolled += 1;
            if progress == MAX_PROGRESS {
                stats.completed += 1;
            } else if progress > 0 {
                stats.in_progress += 1;
            }
        }

        stats
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardEntryResponse {
    pub enrollment: EnrollmentResponse,
    pub course: CourseResponse,
}

impl From<DashboardEntry> for DashboardEntryResponse {
    fn from(entry: DashboardEntry) -> Self {
        Self {
            enrollment: entry.enrollment.into(),
            course: entry.course.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDashboardResponse {
    pub entries: Vec<DashboardEntryResponse>,
    pub stats: DashboardStats,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stats_bucket_by_progress() {
        let stats = DashboardStats::from_progress_values([0, 45, 99, 100, 100].into_iter());
        assert_eq!(stats.enrolled, 5);
        // unstarted enrollments count toward neither card
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.completed, 2);
    }

    #[test]
    fn test_stats_empty_dashboard() {
        let stats = DashboardStats::from_progress_values(std::iter::empty());
        assert_eq!(stats.enrolled, 0);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.completed, 0);
    }
}
