//! Course form extraction.

use std::collections::HashMap;

use crate::models::{CreateCourseRequest, Module, UpdateCourseRequest};

/// One input field tagged with the correlation id of the list item it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub item_id: u32,
    pub value: String,
}

impl FormField {
    pub fn new(item_id: u32, value: impl Into<String>) -> Self {
        Self {
            item_id,
            value: value.into(),
        }
    }
}

/// Raw values of a submitted create/edit form, in field order.
#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub title: String,
    pub instructor: String,
    pub level: String,
    pub duration: String,
    pub description: String,
    pub objectives: Vec<String>,
    pub module_titles: Vec<FormField>,
    pub module_descriptions: Vec<FormField>,
}

/// Trimmed objectives with empty entries dropped.
pub fn extract_objectives(inputs: &[String]) -> Vec<String> {
    inputs
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pair each module title with its description by item id; drop untitled modules.
pub fn extract_modules(titles: &[FormField], descriptions: &[FormField]) -> Vec<Module> {
    let descriptions: HashMap<u32, &str> = descriptions
        .iter()
        .map(|d| (d.item_id, d.value.as_str()))
        .collect();

    titles
        .iter()
        .filter_map(|field| {
            let title = field.value.trim();
            if title.is_empty() {
                return None;
            }
            let description = descriptions
                .get(&field.item_id)
                .map(|d| d.trim())
                .unwrap_or_default();
            Some(Module::outline(title, description))
        })
        .collect()
}

impl CourseForm {
    fn objectives(&self) -> Vec<String> {
        extract_objectives(&self.objectives)
    }

    fn modules(&self) -> Vec<Module> {
        extract_modules(&self.module_titles, &self.module_descriptions)
    }

    pub fn to_create_request(&self) -> CreateCourseRequest {
        CreateCourseRequest {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            instructor: Some(self.instructor.trim().to_string()),
            duration: Some(self.duration.trim().to_string()),
            level: Some(self.level.clone()),
            objectives: Some(self.objectives()),
            modules: Some(self.modules()),
        }
    }

    /// An edit submits every field, so the stored course is fully replaced apart
    /// from its id and creation time.
    pub fn to_update_request(&self) -> UpdateCourseRequest {
        UpdateCourseRequest {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            instructor: Some(self.instructor.trim().to_string()),
            duration: Some(self.duration.trim().to_string()),
            level: Some(self.level.clone()),
            objectives: Some(self.objectives()),
            modules: Some(self.modules()),
        }
    }
}
