use crate::doc::ApiDoc;
use axum::{
    Router,
    routing::{get, patch, post},
};
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod doc;
mod dtos;
mod routes;
mod utils;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = database::db::create_connection()
        .await
        .expect("Failed to connect to database");

    let issuer_url =
        std::env::var("OIDC_ISSUER_URL").expect("OIDC_ISSUER_URL environment variable is not set");

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(issuer_url)
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let public = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route("/courses", get(routes::course::get_courses))
        .route("/courses/{id}", get(routes::course::get_course_by_id))
        .route("/courses/{id}/reviews", get(routes::review::get_course_reviews));

    // Everything below requires a bearer token from the identity provider
    let protected = Router::new()
        .route(
            "/users/me",
            get(routes::user::get_me).post(routes::user::create_me),
        )
        .route("/reviews", post(routes::review::create_review))
        .route("/enrollments", post(routes::enrollment::enroll))
        .route(
            "/courses/{id}/enrollment",
            get(routes::enrollment::check_enrollment),
        )
        .route(
            "/enrollments/{id}/progress",
            patch(routes::enrollment::update_progress),
        )
        .route(
            "/enrollments/{id}/lessons/{lesson_id}",
            post(routes::enrollment::complete_lesson),
        )
        .route(
            "/enrollments/{id}/certificate",
            get(routes::enrollment::download_certificate),
        )
        .route("/dashboard/student", get(routes::dashboard::student_dashboard))
        .route(
            "/dashboard/instructor",
            get(routes::dashboard::instructor_dashboard),
        )
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(db);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");

    info!("Running axum on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .expect("Server error");
}
