use crate::dtos::review::ReviewResponse;
use chrono::NaiveDateTime;
use database::{
    entities::{courses, users},
    services::catalog::CourseDetail,
};
use models::catalog::{FilterConfig, SortBy};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseQueryParams {
    /// Free-text search over title and description
    pub search: Option<String>,

    /// Category name, or "all"
    pub category: Option<String>,

    /// Level name, or "all"
    pub level: Option<String>,

    /// "all", or "min-max" where an empty max means unbounded
    pub price_range: Option<String>,

    /// One of: popular, newest, price-low, price-high
    pub sort_by: Option<String>,

    /// Cap on the number of returned courses, applied after sorting
    pub limit: Option<usize>,
}

impl CourseQueryParams {
    /// Build the in-memory filter config, treating absent or "all"
    /// selections as inactive predicates
    pub fn filter_config(&self) -> Result<FilterConfig, String> {
        let mut config = FilterConfig::default();

        if let Some(category) = active(&self.category) {
            config.category = Some(
                category
                    .parse()
                    .map_err(|_| format!("Unknown category: {category}"))?,
            );
        }

        if let Some(level) = active(&self.level) {
            config.level = Some(level.parse().map_err(|_| format!("Unknown level: {level}"))?);
        }

        if let Some(price_range) = active(&self.price_range) {
            config.price_range = price_range
                .parse()
                .map_err(|err| format!("Invalid price range: {err}"))?;
        }

        if let Some(sort_by) = self.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            config.sort_by = sort_by
                .parse::<SortBy>()
                .map_err(|_| format!("Unknown sort order: {sort_by}"))?;
        }

        Ok(config)
    }
}

/// A missing or "all" selection means the filter is inactive
fn active(param: &Option<String>) -> Option<&str> {
    param
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: String,
    pub category: String,
    pub level: String,
    pub status: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub rating: f64,
    pub review_count: i32,
    pub enrollment_count: i32,
    pub created_at: NaiveDateTime,
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            description: course.description,
            instructor_id: course.instructor_id,
            category: course.category.to_string(),
            level: course.level.to_string(),
            status: course.status.to_string(),
            price: course.price,
            original_price: course.original_price,
            rating: course.rating,
            review_count: course.review_count,
            enrollment_count: course.enrollment_count,
            created_at: course.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
    /// How many published courses existed before filtering, for the
    /// "showing X of Y" line
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorSummary {
    pub id: String,
    pub display_name: String,
    pub bio: String,
    pub photo_url: Option<String>,
}

impl From<users::Model> for InstructorSummary {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
            bio: user.bio,
            photo_url: user.photo_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub course: CourseResponse,
    pub instructor: Option<InstructorSummary>,
    pub reviews: Vec<ReviewResponse>,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        Self {
            course: detail.course.into(),
            instructor: detail.instructor.map(Into::into),
            reviews: detail.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use models::{
        catalog::PriceRange,
        course::{Category, Level},
    };

    fn params() -> CourseQueryParams {
        CourseQueryParams {
            search: None,
            category: None,
            level: None,
            price_range: None,
            sort_by: None,
            limit: None,
        }
    }

    #[test]
    fn test_absent_params_mean_no_filtering() {
        let config = params().filter_config().unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_all_selections_are_inactive() {
        let mut p = params();
        p.category = Some("all".to_owned());
        p.level = Some("ALL".to_owned());
        p.price_range = Some("all".to_owned());

        let config = p.filter_config().unwrap();
        assert_eq!(config.category, None);
        assert_eq!(config.level, None);
        assert_eq!(config.price_range, PriceRange::All);
    }

    #[test]
    fn test_active_selections_parse() {
        let mut p = params();
        p.category = Some("design".to_owned());
        p.level = Some("advanced".to_owned());
        p.price_range = Some("50-100".to_owned());
        p.sort_by = Some("price-low".to_owned());

        let config = p.filter_config().unwrap();
        assert_eq!(config.category, Some(Category::Design));
        assert_eq!(config.level, Some(Level::Advanced));
        assert_eq!(config.price_range, PriceRange::Between { min: 50.0, max: Some(100.0) });
        assert_eq!(config.sort_by, SortBy::PriceLow);
    }

    #[test]
    fn test_bad_selections_are_rejected() {
        let mut p = params();
        p.category = Some("astrology".to_owned());
        assert!(p.filter_config().is_err());

        let mut p = params();
        p.price_range = Some("cheap".to_owned());
        assert!(p.filter_config().is_err());

        let mut p = params();
        p.sort_by = Some("alphabetical".to_owned());
        assert!(p.filter_config().is_err());
    }
}
