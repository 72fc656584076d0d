//! Aggregate statistics over the full collection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::Course;

static HOURS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:hour|hr|h)").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_courses: usize,
    pub total_modules: usize,
    pub total_hours: u64,
}

impl CatalogStats {
    pub fn compute(courses: &[Course]) -> Self {
        Self {
            total_courses: courses.len(),
            total_modules: courses.iter().map(|c| c.modules.len()).sum(),
            total_hours: courses
                .iter()
                .map(|c| duration_hours(&c.duration))
                .fold(0, u64::saturating_add),
        }
    }

    /// Total duration as displayed, e.g. `"12h"`.
    pub fn total_duration(&self) -> String {
        format!("{}h", self.total_hours)
    }
}

/// Hours from the first `<n> hour|hr|h` mention; 0 when there is none.
pub fn duration_hours(duration: &str) -> u64 {
    HOURS
        .captures(duration)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}
