use crate::{
    dtos::enrollment::{EnrollRequest, EnrollmentResponse, ProgressUpdateRequest},
    routes::internal_error,
    utils::guard,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::{
    entities::enrollments,
    services::enrollment::{EnrollError, EnrollmentService},
};
use models::{course::Role, enrollment::MAX_PROGRESS};
use sea_orm::{DatabaseConnection, prelude::Uuid};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Enroll the signed-in student into a published course
#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "No profile, or not a student"),
        (status = 404, description = "Course not found or not published"),
        (status = 409, description = "Already enrolled in this course"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn enroll(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Json(body): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), (StatusCode, String)> {
    let user = guard::check_access(&db, &claims, Some(Role::Student))
        .await
        .map_err(internal_error)?
        .granted()?;

    let enrollment = EnrollmentService::enroll(&db, &user.id, body.course_id)
        .await
        .map_err(enroll_error_response)?;

    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

fn enroll_error_response(err: EnrollError) -> (StatusCode, String) {
    match err {
        EnrollError::AlreadyEnrolled => (
            StatusCode::CONFLICT,
            "You are already enrolled in this course".to_owned(),
        ),
        EnrollError::CourseNotFound => (
            StatusCode::NOT_FOUND,
            "Course not found or not published".to_owned(),
        ),
        EnrollError::Database(err) => internal_error(err),
    }
}

/// Check whether the signed-in user is enrolled in a course
#[utoipa::path(
    get,
    path = "/courses/{id}/enrollment",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "The caller's enrollment in this course", body = EnrollmentResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "No profile for this account"),
        (status = 404, description = "Not enrolled in this course"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn check_enrollment(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentResponse>, (StatusCode, String)> {
    let user = guard::check_access(&db, &claims, None)
        .await
        .map_err(internal_error)?
        .granted()?;

    let enrollment = EnrollmentService::find_enrollment(&db, &user.id, id)
        .await
        .map_err(internal_error)?
        .ok_or((StatusCode::NOT_FOUND, "Not enrolled in this course".to_owned()))?;

    Ok(Json(enrollment.into()))
}

/// Report a new progress percentage for an enrollment
#[utoipa::path(
    patch,
    path = "/enrollments/{id}/progress",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID")
    ),
    request_body = ProgressUpdateRequest,
    responses(
        (status = 200, description = "Progress recorded", body = EnrollmentResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not this enrollment's student"),
        (status = 404, description = "Enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn update_progress(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Path(id): Path<Uuid>,
    Json(body): Json<ProgressUpdateRequest>,
) -> Result<Json<EnrollmentResponse>, (StatusCode, String)> {
    let enrollment = owned_enrollment(&db, &claims, id).await?;

    let enrollment = EnrollmentService::record_progress(&db, enrollment, body.progress)
        .await
        .map_err(internal_error)?;

    Ok(Json(enrollment.into()))
}

/// Mark a lesson as completed within an enrollment
#[utoipa::path(
    post,
    path = "/enrollments/{id}/lessons/{lesson_id}",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID"),
        ("lesson_id" = String, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson recorded as completed", body = EnrollmentResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not this enrollment's student"),
        (status = 404, description = "Enrollment not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn complete_lesson(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Path((id, lesson_id)): Path<(Uuid, String)>,
) -> Result<Json<EnrollmentResponse>, (StatusCode, String)> {
    let enrollment = owned_enrollment(&db, &claims, id).await?;

    let enrollment = EnrollmentService::mark_lesson_complete(&db, enrollment, &lesson_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(enrollment.into()))
}

/// Download the completion certificate for a finished course
#[utoipa::path(
    get,
    path = "/enrollments/{id}/certificate",
    params(
        ("id" = Uuid, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not this enrollment's student"),
        (status = 404, description = "Enrollment not found"),
        (status = 409, description = "Course not completed yet"),
        (status = 501, description = "Certificate rendering not available"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn download_certificate(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentResponse>, (StatusCode, String)> {
    let enrollment = owned_enrollment(&db, &claims, id).await?;

    if enrollment.progress < MAX_PROGRESS {
        return Err((
            StatusCode::CONFLICT,
            "Complete the course to download your certificate".to_owned(),
        ));
    }

    // Completion is verified above; rendering the document itself is not
    // built yet
    Err((
        StatusCode::NOT_IMPLEMENTED,
        "Certificate downloads are not available yet".to_owned(),
    ))
}

/// Fetch an enrollment and verify the caller is its student
async fn owned_enrollment(
    db: &DatabaseConnection,
    claims: &DefaultClaims,
    enrollment_id: Uuid,
) -> Result<enrollments::Model, (StatusCode, String)> {
    let user = guard::check_access(db, claims, None)
        .await
        .map_err(internal_error)?
        .granted()?;

    let enrollment = EnrollmentService::get(db, enrollment_id)
        .await
        .map_err(internal_error)?
        .ok_or((StatusCode::NOT_FOUND, "Enrollment not found".to_owned()))?;

    if enrollment.student_id != user.id {
        return Err((
            StatusCode::FORBIDDEN,
            "This enrollment belongs to another student".to_owned(),
        ));
    }

    Ok(enrollment)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duplicate_enroll_maps_to_conflict() {
        let (status, message) = enroll_error_response(EnrollError::AlreadyEnrolled);
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(message.contains("already enrolled"));
    }

    #[test]
    fn test_unknown_course_maps_to_not_found() {
        let (status, _) = enroll_error_response(EnrollError::CourseNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
