//! Client session over the local slot store.
//!
//! Mirrors what the browser client does with its local storage: load once, apply
//! each form submission or action to the repository, and report the outcome as a
//! transient notification.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use sqlx::SqlitePool;

use super::filter::{filter_courses, CourseFilter};
use super::form::CourseForm;
use super::stats::CatalogStats;
use crate::db::{
    all_courses_file_name, course_file_name, CourseExport, CourseRepository, CourseStorage,
    IdStrategy, SlotStorage,
};
use crate::errors::AppError;
use crate::models::Course;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Client-side controller owning a timestamp-id repository over one storage slot.
pub struct ClientSession {
    repo: Arc<CourseRepository>,
    notices: Mutex<Vec<Notice>>,
}

impl ClientSession {
    /// Open a session over the `courses` slot of `pool`.
    pub async fn open(pool: SqlitePool) -> Self {
        Self::with_storage(Arc::new(SlotStorage::new(pool))).await
    }

    /// Open a session over any storage. An unreadable store starts the session empty.
    pub async fn with_storage(storage: Arc<dyn CourseStorage>) -> Self {
        let mut notices = Vec::new();
        let repo = match CourseRepository::open(storage.clone(), IdStrategy::Timestamp).await {
            Ok(repo) => repo,
            Err(e) => {
                tracing::warn!("Error loading courses, starting empty: {}", e);
                notices.push(Notice::error("Error loading courses"));
                CourseRepository::with_courses(storage, IdStrategy::Timestamp, Vec::new())
            }
        };

        Self {
            repo: Arc::new(repo),
            notices: Mutex::new(notices),
        }
    }

    pub fn repository(&self) -> Arc<CourseRepository> {
        self.repo.clone()
    }

    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }

    /// Take every pending notification.
    pub fn drain_notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }

    /// Report a failed repository call; save failures get the generic save message.
    fn report<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(e) = &result {
            let message = match e {
                AppError::Storage(_) => "Error saving courses".to_string(),
                other => other.message(),
            };
            self.notify(Notice::error(message));
        }
        result
    }

    /// Create a course, or update `editing` when it names an existing course.
    pub async fn submit(&self, form: &CourseForm, editing: Option<i64>) -> Result<Course, AppError> {
        let result = match editing {
            Some(id) => self
                .repo
                .update(id, form.to_update_request())
                .await
                .inspect(|_| self.notify(Notice::success("Course updated successfully!"))),
            None => self
                .repo
                .create(form.to_create_request())
                .await
                .inspect(|_| self.notify(Notice::success("Course created successfully!"))),
        };
        self.report(result)
    }

    pub async fn remove(&self, id: i64) -> Result<(), AppError> {
        let result = self
            .repo
            .delete(id)
            .await
            .inspect(|_| self.notify(Notice::success("Course deleted successfully")));
        self.report(result)
    }

    pub async fn course(&self, id: i64) -> Result<Course, AppError> {
        self.repo.get(id).await
    }

    /// Courses shown under the current filter selection.
    pub async fn visible(&self, filter: &CourseFilter) -> Vec<Course> {
        let courses = self.repo.list().await;
        filter_courses(&courses, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> CatalogStats {
        CatalogStats::compute(&self.repo.list().await)
    }

    /// Export one course under a timestamped file name.
    pub async fn export_course(&self, id: i64) -> Result<CourseExport, AppError> {
        let course = self.repo.get(id).await?;
        let file_name = course_file_name(&course.title, Utc::now().timestamp_millis());
        let export = CourseExport::new(file_name, &course)?;
        self.notify(Notice::success("Course exported successfully!"));
        Ok(export)
    }

    /// Export the whole collection; refuses when there is nothing to export.
    pub async fn export_all(&self) -> Result<CourseExport, AppError> {
        let courses = self.repo.list().await;
        if courses.is_empty() {
            let err = AppError::InvalidInput("No courses to export".to_string());
            self.notify(Notice::error(err.message()));
            return Err(err);
        }

        let export = CourseExport::new(
            all_courses_file_name(Utc::now().timestamp_millis()),
            &courses,
        )?;
        let plural = if courses.len() == 1 { "" } else { "s" };
        self.notify(Notice::success(format!(
            "Exported {} course{}!",
            courses.len(),
            plural
        )));
        Ok(export)
    }
}
