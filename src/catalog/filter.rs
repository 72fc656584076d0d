//! Level filter and free-text search.

use crate::models::Course;

/// Current filter selection. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub level: String,
    pub search: String,
}

impl CourseFilter {
    pub fn new(level: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            search: search.into(),
        }
    }

    /// Exact level match and case-insensitive substring match on title,
    /// description or instructor.
    pub fn matches(&self, course: &Course) -> bool {
        let level_ok = self.level.is_empty() || course.level == self.level;
        if !level_ok {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        [&course.title, &course.description, &course.instructor]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Courses visible under `filter`, in collection order.
pub fn filter_courses<'a>(courses: &'a [Course], filter: &CourseFilter) -> Vec<&'a Course> {
    courses.iter().filter(|c| filter.matches(c)).collect()
}
