//! Module model: a named subdivision of a course.

use serde::{Deserialize, Serialize};

/// Title given to modules added without one.
pub const DEFAULT_MODULE_TITLE: &str = "Untitled Module";

/// A module nested under a course.
///
/// Modules extracted from the course form only carry a title and description;
/// modules added through the module endpoint also get an id, lessons and a duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Module {
    /// A title/description pair as produced by form extraction.
    pub fn outline(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Request body for adding a module to a course.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lessons: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl CreateModuleRequest {
    /// Build the stored module, filling every absent field with its default.
    pub fn into_module(self, id: i64) -> Module {
        Module {
            id: Some(id),
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_MODULE_TITLE.to_string()),
            description: self.description.unwrap_or_default(),
            lessons: Some(self.lessons.unwrap_or_default()),
            duration: Some(self.duration.unwrap_or_default()),
        }
    }
}
