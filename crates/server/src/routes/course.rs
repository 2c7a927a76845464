use crate::{
    dtos::course::{CourseDetailResponse, CourseListResponse, CourseQueryParams, CourseResponse},
    routes::internal_error,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::catalog::CatalogService;
use models::catalog::filter_courses;
use sea_orm::{DatabaseConnection, prelude::Uuid};

/// Browse published courses with the explore-page filters applied
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "Filtered course list", body = CourseListResponse),
        (status = 400, description = "Invalid filter parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(db): State<DatabaseConnection>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<CourseListResponse>, (StatusCode, String)> {
    let config = params
        .filter_config()
        .map_err(|message| (StatusCode::BAD_REQUEST, message))?;

    let published = CatalogService::list_published(&db).await.map_err(internal_error)?;
    let total = published.len();

    let search = params.search.as_deref().unwrap_or("");
    let mut filtered = filter_courses(published, &config, search);

    if let Some(limit) = params.limit {
        filtered.truncate(limit);
    }

    Ok(Json(CourseListResponse {
        courses: filtered.into_iter().map(CourseResponse::from).collect(),
        total,
    }))
}

/// Get a course's detail page: the course, its instructor, and its reviews
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, (StatusCode, String)> {
    let detail = CatalogService::get_course_detail(&db, id)
        .await
        .map_err(internal_error)?
        .ok_or((StatusCode::NOT_FOUND, "Course not found".to_owned()))?;

    Ok(Json(detail.into()))
}
