use crate::course::{Category, Level};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Custom error type for parsing a price range filter
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ParsePriceRangeError {
    EmptyInput,
    MissingSeparator,
    InvalidBound,
}

impl Display for ParsePriceRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyInput => write!(f, "Empty input string"),
            Self::MissingSeparator => write!(f, "Expected \"all\" or \"min-max\""),
            Self::InvalidBound => write!(f, "Price bound is not a valid number"),
        }
    }
}

/// A price window a course must fall into to stay visible
///
/// Encoded on the wire as `"all"` or `"min-max"`, where an empty max means
/// unbounded (`"200-"` is every course at $200 or more). Bounds are inclusive,
/// so `"0-0"` selects exactly the free courses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PriceRange {
    #[default]
    All,
    Between { min: f64, max: Option<f64> },
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        match self {
            Self::All => true,
            Self::Between { min, max } => {
                price >= *min && max.is_none_or(|max| price <= max)
            }
        }
    }
}

impl FromStr for PriceRange {
    type Err = ParsePriceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ParsePriceRangeError::EmptyInput);
        }

        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let (min, max) = s
            .split_once('-')
            .ok_or(ParsePriceRangeError::MissingSeparator)?;

        let min: f64 = min
            .trim()
            .parse()
            .map_err(|_| ParsePriceRangeError::InvalidBound)?;

        let max = match max.trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .map_err(|_| ParsePriceRangeError::InvalidBound)?,
            ),
        };

        Ok(Self::Between { min, max })
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::All => write!(f, "all"),
            Self::Between { min, max: Some(max) } => write!(f, "{min}-{max}"),
            Self::Between { min, max: None } => write!(f, "{min}-"),
        }
    }
}

/// The order courses are presented in after filtering
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Descending enrollment count
    #[default]
    Popular,
    /// Descending creation time
    Newest,
    /// Ascending price
    PriceLow,
    /// Descending price
    PriceHigh,
}

/// The filter sidebar state: which courses stay visible and in what order
///
/// `None` for category or level means the "all" option, i.e. the predicate
/// is inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterConfig {
    pub category: Option<Category>,
    pub level: Option<Level>,
    pub price_range: PriceRange,
    pub sort_by: SortBy,
}

/// The course fields the catalog filter reads
pub trait CatalogCourse {
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn category(&self) -> Category;
    fn level(&self) -> Level;
    fn price(&self) -> f64;
    fn enrollment_count(&self) -> i32;
    fn created_at(&self) -> NaiveDateTime;
}

/// Reduce a course list to the visible subset, in display order
///
/// Every predicate (search term, category, level, price range) must hold for
/// a course to survive; the predicates commute, only the final sort is
/// order-sensitive. Ties keep their input order. Pure and synchronous, so it
/// is safe to re-run on every filter change.
pub fn filter_courses<C: CatalogCourse>(
    courses: Vec<C>,
    config: &FilterConfig,
    search_term: &str,
) -> Vec<C> {
    let needle = search_term.trim().to_lowercase();

    let mut visible: Vec<C> = courses
        .into_iter()
        .filter(|course| {
            matches_search(course, &needle)
                && config.category.is_none_or(|category| course.category() == category)
                && config.level.is_none_or(|level| course.level() == level)
                && config.price_range.contains(course.price())
        })
        .collect();

    // Vec::sort_by is stable, which is what keeps ties in input order
    match config.sort_by {
        SortBy::Popular => {
            visible.sort_by(|a, b| b.enrollment_count().cmp(&a.enrollment_count()));
        }
        SortBy::Newest => visible.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortBy::PriceLow => visible.sort_by(|a, b| compare_prices(a.price(), b.price())),
        SortBy::PriceHigh => visible.sort_by(|a, b| compare_prices(b.price(), a.price())),
    }

    visible
}

/// Case-insensitive substring match on title or description
///
/// An empty search term keeps everything.
fn matches_search<C: CatalogCourse>(course: &C, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    course.title().to_lowercase().contains(needle)
        || course
            .description()
            .is_some_and(|description| description.to_lowercase().contains(needle))
}

fn compare_prices(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    struct TestCourse {
        id: u32,
        title: &'static str,
        description: Option<&'static str>,
        category: Category,
        level: Level,
        price: f64,
        enrollment_count: i32,
        created_at: NaiveDateTime,
    }

    impl CatalogCourse for TestCourse {
        fn title(&self) -> &str {
            self.title
        }

        fn description(&self) -> Option<&str> {
            self.description
        }

        fn category(&self) -> Category {
            self.category
        }

        fn level(&self) -> Level {
            self.level
        }

        fn price(&self) -> f64 {
            self.price
        }

        fn enrollment_count(&self) -> i32 {
            self.enrollment_count
        }

        fn created_at(&self) -> NaiveDateTime {
            self.created_at
        }
    }

    fn day(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn course(id: u32, price: f64, enrollment_count: i32) -> TestCourse {
        TestCourse {
            id,
            title: "Intro to Rust",
            description: Some("Systems programming from scratch"),
            category: Category::Programming,
            level: Level::Beginner,
            price,
            enrollment_count,
            created_at: day(1),
        }
    }

    fn ids(courses: &[TestCourse]) -> Vec<u32> {
        courses.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_price_range_from_str() {
        assert_eq!(PriceRange::from_str("all").unwrap(), PriceRange::All);
        assert_eq!(
            PriceRange::from_str("0-50").unwrap(),
            PriceRange::Between { min: 0.0, max: Some(50.0) }
        );
        assert_eq!(
            PriceRange::from_str("200-").unwrap(),
            PriceRange::Between { min: 200.0, max: None }
        );
        assert_eq!(
            PriceRange::from_str("").unwrap_err(),
            ParsePriceRangeError::EmptyInput
        );
        assert_eq!(
            PriceRange::from_str("cheap").unwrap_err(),
            ParsePriceRangeError::MissingSeparator
        );
        assert_eq!(
            PriceRange::from_str("ten-20").unwrap_err(),
            ParsePriceRangeError::InvalidBound
        );
    }

    #[test]
    fn test_price_range_display_round_trip() {
        for raw in ["all", "0-50", "200-"] {
            let parsed = PriceRange::from_str(raw).unwrap();
            assert_eq!(PriceRange::from_str(&parsed.to_string()).unwrap(), parsed);
        }
    }

    #[test]
    fn test_price_range_bounds_inclusive() {
        let range = PriceRange::from_str("50-100").unwrap();
        assert!(range.contains(50.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(49.99));
        assert!(!range.contains(100.01));

        let open = PriceRange::from_str("200-").unwrap();
        assert!(open.contains(200.0));
        assert!(open.contains(10_000.0));
        assert!(!open.contains(199.0));
    }

    #[test]
    fn test_sort_by_parse() {
        assert_eq!("price-low".parse::<SortBy>().unwrap(), SortBy::PriceLow);
        assert_eq!("popular".parse::<SortBy>().unwrap(), SortBy::Popular);
        assert_eq!(SortBy::PriceHigh.to_string(), "price-high");
        assert!("alphabetical".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let courses = vec![course(1, 10.0, 5), course(2, 20.0, 3)];
        let visible = filter_courses(courses, &FilterConfig::default(), "   ");
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let mut a = course(1, 10.0, 0);
        a.title = "Watercolor Basics";
        a.description = Some("Painting for beginners");
        let mut b = course(2, 10.0, 0);
        b.title = "Advanced Rust";
        b.description = Some("Lifetimes and unsafe code");
        let mut c = course(3, 10.0, 0);
        c.title = "Guitar 101";
        c.description = None;

        let visible = filter_courses(vec![a, b, c], &FilterConfig::default(), "RUST");
        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn test_category_and_level_filters() {
        let mut a = course(1, 10.0, 0);
        a.category = Category::Music;
        let mut b = course(2, 10.0, 0);
        b.level = Level::Advanced;
        let c = course(3, 10.0, 0);

        let config = FilterConfig {
            category: Some(Category::Programming),
            level: Some(Level::Beginner),
            ..FilterConfig::default()
        };

        let visible = filter_courses(vec![a, b, c], &config, "");
        assert_eq!(ids(&visible), vec![3]);
    }

    #[test]
    fn test_free_price_range_selects_only_free_courses() {
        let courses = vec![course(1, 0.0, 10), course(2, 50.0, 100)];
        let config = FilterConfig {
            price_range: "0-0".parse().unwrap(),
            ..FilterConfig::default()
        };

        let visible = filter_courses(courses, &config, "");
        assert_eq!(ids(&visible), vec![1]);
    }

    #[test]
    fn test_popular_sort_orders_by_enrollment() {
        let courses = vec![course(1, 0.0, 10), course(2, 50.0, 100)];
        let visible = filter_courses(courses, &FilterConfig::default(), "");
        assert_eq!(ids(&visible), vec![2, 1]);
    }

    #[test]
    fn test_newest_sort_orders_by_creation_time() {
        let mut a = course(1, 0.0, 0);
        a.created_at = day(3);
        let mut b = course(2, 0.0, 0);
        b.created_at = day(10);
        let mut c = course(3, 0.0, 0);
        c.created_at = day(7);

        let config = FilterConfig { sort_by: SortBy::Newest, ..FilterConfig::default() };
        let visible = filter_courses(vec![a, b, c], &config, "");
        assert_eq!(ids(&visible), vec![2, 3, 1]);
    }

    #[test]
    fn test_price_sorts_are_monotonic() {
        let courses = vec![course(1, 75.0, 0), course(2, 0.0, 0), course(3, 200.0, 0)];
        let config = FilterConfig { sort_by: SortBy::PriceLow, ..FilterConfig::default() };
        let low = filter_courses(courses, &config, "");
        let prices: Vec<f64> = low.iter().map(|c| c.price).collect();
        assert!(prices.windows(2).all(|pair| pair[0] <= pair[1]));

        let courses = vec![course(1, 75.0, 0), course(2, 0.0, 0), course(3, 200.0, 0)];
        let config = FilterConfig { sort_by: SortBy::PriceHigh, ..FilterConfig::default() };
        let high = filter_courses(courses, &config, "");
        let prices: Vec<f64> = high.iter().map(|c| c.price).collect();
        assert!(prices.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_ties_preserve_input_order() {
        for sort_by in [SortBy::Popular, SortBy::Newest, SortBy::PriceLow, SortBy::PriceHigh] {
            let courses = vec![course(1, 50.0, 7), course(2, 50.0, 7), course(3, 50.0, 7)];
            let config = FilterConfig { sort_by, ..FilterConfig::default() };
            assert_eq!(ids(&filter_courses(courses, &config, "")), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let courses = vec![course(1, 10.0, 1), course(2, 20.0, 2), course(3, 30.0, 3)];
        let input_ids: Vec<u32> = ids(&courses);

        let config = FilterConfig {
            price_range: "15-".parse().unwrap(),
            ..FilterConfig::default()
        };
        let visible = filter_courses(courses, &config, "rust");

        let mut seen = std::collections::HashSet::new();
        for course in &visible {
            assert!(input_ids.contains(&course.id));
            assert!(seen.insert(course.id), "course duplicated by filter");
        }
    }

    #[test]
    fn test_active_predicates_all_hold_on_output() {
        let mut a = course(1, 10.0, 0);
        a.category = Category::Design;
        let b = course(2, 120.0, 0);
        let c = course(3, 60.0, 0);

        let config = FilterConfig {
            category: Some(Category::Programming),
            level: Some(Level::Beginner),
            price_range: "50-100".parse().unwrap(),
            ..FilterConfig::default()
        };

        let visible = filter_courses(vec![a, b, c], &config, "rust");
        for course in &visible {
            assert_eq!(course.category, Category::Programming);
            assert_eq!(course.level, Level::Beginner);
            assert!(course.price >= 50.0 && course.price <= 100.0);
            assert!(course.title.to_lowercase().contains("rust"));
        }
        assert_eq!(ids(&visible), vec![3]);
    }
}
