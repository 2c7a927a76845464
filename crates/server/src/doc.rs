use crate::routes::{course, dashboard, enrollment, health, review, root, user};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        course::get_courses,
        course::get_course_by_id,
        review::get_course_reviews,
        review::create_review,
        user::get_me,
        user::create_me,
        enrollment::enroll,
        enrollment::check_enrollment,
        enrollment::update_progress,
        enrollment::complete_lesson,
        enrollment::download_certificate,
        dashboard::student_dashboard,
        dashboard::instructor_dashboard
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Courses", description = "Course discovery endpoints"),
        (name = "Reviews", description = "Course review endpoints"),
        (name = "Users", description = "Profile endpoints"),
        (name = "Enrollments", description = "Enrollment lifecycle endpoints"),
        (name = "Dashboards", description = "Student and instructor dashboards"),
    ),
    info(
        title = "Course Marketplace API",
        version = "1.0.0",
        description = "Course discovery, enrollment, and progress tracking",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
