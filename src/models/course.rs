//! Course model and its request bodies.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Module;

/// Title given to courses created without one.
pub const DEFAULT_COURSE_TITLE: &str = "Untitled Course";

/// Level given to courses created without one.
pub const DEFAULT_LEVEL: &str = "Beginner";

/// Well-known levels. The set is open: any string is accepted as a level.
pub mod levels {
    pub const BEGINNER: &str = "Beginner";
    pub const INTERMEDIATE: &str = "Intermediate";
    pub const ADVANCED: &str = "Advanced";
}

/// A learning course, the only top-level record in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_title() -> String {
    DEFAULT_COURSE_TITLE.to_string()
}

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

impl Course {
    /// Refresh `updated_at`, keeping it strictly after its previous value.
    pub fn touch(&mut self) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = Utc::now().max(floor);
    }
}

/// Return the value unless it is absent or empty.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Request body for creating a new course.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub objectives: Option<Vec<String>>,
    #[serde(default)]
    pub modules: Option<Vec<Module>>,
}

impl CreateCourseRequest {
    /// Build a new record with defaults applied and both timestamps set to `now`.
    pub fn into_course(self, id: i64, now: DateTime<Utc>) -> Course {
        Course {
            id,
            title: present(self.title).unwrap_or_else(|| DEFAULT_COURSE_TITLE.to_string()),
            description: self.description.unwrap_or_default(),
            instructor: self.instructor.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
            level: present(self.level).unwrap_or_else(default_level),
            objectives: self.objectives.unwrap_or_default(),
            modules: self.modules.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for updating an existing course. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub objectives: Option<Vec<String>>,
    #[serde(default)]
    pub modules: Option<Vec<Module>>,
}

impl UpdateCourseRequest {
    /// Merge the provided fields over `course`. Id and creation time are never touched.
    pub fn apply_to(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(instructor) = self.instructor {
            course.instructor = instructor;
        }
        if let Some(duration) = self.duration {
            course.duration = duration;
        }
        if let Some(level) = self.level {
            course.level = level;
        }
        if let Some(objectives) = self.objectives {
            course.objectives = objectives;
        }
        if let Some(modules) = self.modules {
            course.modules = modules;
        }
        course.touch();
    }
}

/// One element of an import payload. Any supplied `id` or `updatedAt` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedCourse {
    #[serde(flatten)]
    pub fields: CreateCourseRequest,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ImportedCourse {
    /// Build the stored record, keeping a supplied creation time.
    ///
    /// `updated_at` never precedes `created_at`, even for a creation time in the future.
    pub fn into_course(self, id: i64, now: DateTime<Utc>) -> Course {
        let created_at = self.created_at.unwrap_or(now);
        let mut course = self.fields.into_course(id, now);
        course.created_at = created_at;
        course.updated_at = now.max(created_at);
        course
    }
}
