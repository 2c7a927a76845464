use crate::{
    dtos::{
        enrollment::{
            DashboardEntryResponse, DashboardQueryParams, DashboardStats, StudentDashboardResponse,
        },
        user::InstructorDashboardResponse,
    },
    routes::internal_error,
    utils::guard,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use database::services::{enrollment::EnrollmentService, user::UserService};
use models::{course::Role, enrollment::DashboardTab};
use sea_orm::DatabaseConnection;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// The student dashboard: enrollments joined to courses, plus the stat cards
///
/// The stats always cover every enrollment; only the entry list narrows to
/// the selected tab.
#[utoipa::path(
    get,
    path = "/dashboard/student",
    params(DashboardQueryParams),
    responses(
        (status = 200, description = "Student dashboard", body = StudentDashboardResponse),
        (status = 400, description = "Unknown tab"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "No profile, or not a student"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Dashboards"
)]
pub async fn student_dashboard(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Query(params): Query<DashboardQueryParams>,
) -> Result<Json<StudentDashboardResponse>, (StatusCode, String)> {
    let user = guard::check_access(&db, &claims, Some(Role::Student))
        .await
        .map_err(internal_error)?
        .granted()?;

    let tab = match params.tab.as_deref() {
        Some(tab) => tab
            .parse::<DashboardTab>()
            .map_err(|_| (StatusCode::BAD_REQUEST, format!("Unknown tab: {tab}")))?,
        None => DashboardTab::default(),
    };

    let entries = EnrollmentService::student_dashboard(&db, &user.id)
        .await
        .map_err(internal_error)?;

    let stats =
        DashboardStats::from_progress_values(entries.iter().map(|entry| entry.enrollment.progress));

    let entries = entries
        .into_iter()
        .filter(|entry| tab.includes(entry.enrollment.progress))
        .map(DashboardEntryResponse::from)
        .collect();

    Ok(Json(StudentDashboardResponse { entries, stats }))
}

/// The instructor dashboard: taught courses and total students reached
#[utoipa::path(
    get,
    path = "/dashboard/instructor",
    responses(
        (status = 200, description = "Instructor dashboard", body = InstructorDashboardResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "No profile, or not an instructor"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Dashboards"
)]
pub async fn instructor_dashboard(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<InstructorDashboardResponse>, (StatusCode, String)> {
    let user = guard::check_access(&db, &claims, Some(Role::Instructor))
        .await
        .map_err(internal_error)?
        .granted()?;

    let stats = UserService::instructor_stats(&db, &user.id)
        .await
        .map_err(internal_error)?;

    Ok(Json(stats.into()))
}
