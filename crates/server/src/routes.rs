use axum::http::StatusCode;
use sea_orm::DbErr;

pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod health;
pub mod review;
pub mod root;
pub mod user;

/// Log the real database error, hand the client a generic 500
pub(crate) fn internal_error(err: DbErr) -> (StatusCode, String) {
    log::error!("Database error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_owned(),
    )
}
