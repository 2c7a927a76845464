use serde::{Deserialize, Serialize};

/// Progress is a whole percentage; 100 completes the course
pub const MAX_PROGRESS: i32 = 100;

/// Clamp a reported progress value into the displayable [0, 100] window
pub fn clamp_progress(value: i32) -> i32 {
    value.clamp(0, MAX_PROGRESS)
}

/// Where an enrollment sits in its lifecycle, derived from progress
///
/// Per-enrollment and terminal at `Completed`; no transition lowers progress
/// back out of the completed state. Completion is also what unlocks the
/// certificate affordance.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EnrollmentStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl EnrollmentStatus {
    pub fn from_progress(progress: i32) -> Self {
        match clamp_progress(progress) {
            0 => Self::NotStarted,
            MAX_PROGRESS => Self::Completed,
            _ => Self::InProgress,
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

/// The dashboard tabs a student can switch between
///
/// Tab membership is intentionally looser than `EnrollmentStatus`: the
/// in-progress tab also lists courses that were never started, so a fresh
/// enrollment shows up somewhere actionable.
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
pub enum DashboardTab {
    #[default]
    All,
    InProgress,
    Completed,
}

impl DashboardTab {
    pub fn includes(self, progress: i32) -> bool {
        match self {
            Self::All => true,
            Self::InProgress => progress < MAX_PROGRESS,
            Self::Completed => progress == MAX_PROGRESS,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(0), 0);
        assert_eq!(clamp_progress(45), 45);
        assert_eq!(clamp_progress(100), 100);
        assert_eq!(clamp_progress(150), 100);
    }

    #[test]
    fn test_status_from_progress() {
        assert_eq!(EnrollmentStatus::from_progress(0), EnrollmentStatus::NotStarted);
        assert_eq!(EnrollmentStatus::from_progress(1), EnrollmentStatus::InProgress);
        assert_eq!(EnrollmentStatus::from_progress(99), EnrollmentStatus::InProgress);
        assert_eq!(EnrollmentStatus::from_progress(100), EnrollmentStatus::Completed);
        // out-of-range input is clamped before classification
        assert_eq!(EnrollmentStatus::from_progress(-5), EnrollmentStatus::NotStarted);
        assert_eq!(EnrollmentStatus::from_progress(150), EnrollmentStatus::Completed);
    }

    #[test]
    fn test_tab_membership_mid_progress() {
        assert!(DashboardTab::All.includes(45));
        assert!(DashboardTab::InProgress.includes(45));
        assert!(!DashboardTab::Completed.includes(45));
    }

    #[test]
    fn test_in_progress_tab_includes_unstarted_courses() {
        assert!(DashboardTab::InProgress.includes(0));
        assert!(!DashboardTab::Completed.includes(0));
    }

    #[test]
    fn test_completed_tab_is_exact() {
        assert!(DashboardTab::Completed.includes(100));
        assert!(!DashboardTab::InProgress.includes(100));
        assert!(DashboardTab::All.includes(100));
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(EnrollmentStatus::InProgress.to_string(), "in-progress");
        assert_eq!("completed".parse::<DashboardTab>().unwrap(), DashboardTab::Completed);
        assert_eq!("in-progress".parse::<DashboardTab>().unwrap(), DashboardTab::InProgress);
    }
}
