//! Export documents and their download file names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::AppError;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A serialized export ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseExport {
    pub file_name: String,
    pub body: String,
}

impl CourseExport {
    /// Pretty-print `value` as the export body.
    pub fn new<T: Serialize + ?Sized>(file_name: String, value: &T) -> Result<Self, AppError> {
        let body = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Internal(format!("Failed to serialize export: {}", e)))?;
        Ok(Self { file_name, body })
    }
}

/// Lowercase the title and collapse every whitespace run into one hyphen.
pub fn slugify(title: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&title.to_lowercase(), "-")
        .into_owned()
}

/// `course-<slug>-<suffix>.json`; the suffix is the id (server) or a timestamp (client).
pub fn course_file_name(title: &str, suffix: i64) -> String {
    format!("course-{}-{}.json", slugify(title), suffix)
}

/// `all-courses-<timestamp>.json`.
pub fn all_courses_file_name(timestamp_millis: i64) -> String {
    format!("all-courses-{}.json", timestamp_millis)
}
