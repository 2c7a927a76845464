use crate::{
    dtos::review::{ReviewRequest, ReviewResponse},
    routes::internal_error,
    utils::guard,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::{
    catalog::CatalogService,
    review::{ReviewError, ReviewService},
};
use sea_orm::{DatabaseConnection, prelude::Uuid};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// List a course's reviews, newest first
#[utoipa::path(
    get,
    path = "/courses/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Reviews for the course", body = Vec<ReviewResponse>),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reviews"
)]
pub async fn get_course_reviews(
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, (StatusCode, String)> {
    CatalogService::get_course(&db, id)
        .await
        .map_err(internal_error)?
        .ok_or((StatusCode::NOT_FOUND, "Course not found".to_owned()))?;

    let reviews = ReviewService::list_for_course(&db, id)
        .await
        .map_err(internal_error)?;

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Submit a review and refresh the course's aggregate rating
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Missing or out-of-range rating"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "No profile for this account"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Json(body): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), (StatusCode, String)> {
    let user = guard::check_access(&db, &claims, None)
        .await
        .map_err(internal_error)?
        .granted()?;

    CatalogService::get_course(&db, body.course_id)
        .await
        .map_err(internal_error)?
        .ok_or((StatusCode::NOT_FOUND, "Course not found".to_owned()))?;

    let review = ReviewService::create(&db, body.course_id, &user.id, body.rating, body.comment)
        .await
        .map_err(|err| match err {
            ReviewError::InvalidRating(_) => {
                (StatusCode::BAD_REQUEST, "Please select a rating".to_owned())
            }
            ReviewError::Database(err) => internal_error(err),
        })?;

    Ok((StatusCode::CREATED, Json(review.into())))
}
