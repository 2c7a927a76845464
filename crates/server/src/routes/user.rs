use crate::{
    dtos::user::{CreateProfileRequest, ProfileResponse},
    routes::internal_error,
    utils::guard,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use database::services::user::{ProfileError, UserService};
use models::course::Role;
use sea_orm::DatabaseConnection;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Get the signed-in user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileResponse),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "No profile for this account"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn get_me(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let sub = guard::subject(&claims).map_err(guard::Denial::into_error)?;

    let profile = UserService::get_profile(&db, sub)
        .await
        .map_err(internal_error)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not found".to_owned()))?;

    Ok(Json(profile.into()))
}

/// Finish signup: create the profile for the authenticated subject
#[utoipa::path(
    post,
    path = "/users/me",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Missing name fields or unknown role"),
        (status = 401, description = "Not signed in"),
        (status = 409, description = "Profile already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn create_me(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<DefaultClaims>,
    Json(body): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), (StatusCode, String)> {
    let sub = guard::subject(&claims).map_err(guard::Denial::into_error)?;

    let first_name = body.first_name.trim().to_owned();
    let last_name = body.last_name.trim().to_owned();
    if first_name.is_empty() || last_name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Please fill in all fields".to_owned()));
    }

    let role = body
        .role
        .parse::<Role>()
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("Unknown role: {}", body.role)))?;

    let profile = UserService::create_profile(
        &db,
        sub,
        role,
        first_name,
        last_name,
        body.photo_url,
        body.bio,
    )
    .await
    .map_err(|err| match err {
        ProfileError::AlreadyExists => (
            StatusCode::CONFLICT,
            "A profile already exists for this account".to_owned(),
        ),
        ProfileError::Database(err) => internal_error(err),
    })?;

    Ok((StatusCode::CREATED, Json(profile.into())))
}
