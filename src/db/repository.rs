//! Course repository: CRUD, import/export, and full-collection persistence.
//!
//! The repository owns the in-memory collection. Every mutation is applied in
//! memory and then the entire collection is written to the backing storage while
//! the collection lock is still held, so two writers never interleave at the
//! persistence boundary. A failed write is reported but not rolled back.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::ids::{IdAllocator, IdStrategy, TimestampIds};
use super::storage::CourseStorage;
use super::transfer::{all_courses_file_name, course_file_name, CourseExport};
use crate::errors::AppError;
use crate::models::{
    Course, CreateCourseRequest, CreateModuleRequest, ImportedCourse, Module, UpdateCourseRequest,
};

/// Mutable state guarded by the repository lock.
struct Catalog {
    courses: Vec<Course>,
    course_ids: Box<dyn IdAllocator>,
    module_ids: TimestampIds,
}

impl Catalog {
    fn new(courses: Vec<Course>, strategy: IdStrategy) -> Self {
        let max_course_id = courses.iter().map(|c| c.id).max();
        let max_module_id = courses
            .iter()
            .flat_map(|c| c.modules.iter().filter_map(|m| m.id))
            .max();

        Self {
            course_ids: strategy.allocator(max_course_id),
            module_ids: TimestampIds::starting_after(max_module_id),
            courses,
        }
    }

    fn position(&self, id: i64) -> Result<usize, AppError> {
        self.courses
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(AppError::course_not_found)
    }
}

/// Repository for all course operations.
pub struct CourseRepository {
    storage: Arc<dyn CourseStorage>,
    catalog: Mutex<Catalog>,
}

impl CourseRepository {
    /// Load the collection from `storage`.
    pub async fn open(
        storage: Arc<dyn CourseStorage>,
        strategy: IdStrategy,
    ) -> Result<Self, AppError> {
        let courses = storage.load().await?;
        tracing::info!(
            "Loaded {} courses from {}",
            courses.len(),
            storage.describe()
        );
        Ok(Self::with_courses(storage, strategy, courses))
    }

    /// Build a repository over an already-loaded collection.
    pub fn with_courses(
        storage: Arc<dyn CourseStorage>,
        strategy: IdStrategy,
        courses: Vec<Course>,
    ) -> Self {
        Self {
            storage,
            catalog: Mutex::new(Catalog::new(courses, strategy)),
        }
    }

    /// Write the full collection. Failures are logged and returned.
    async fn persist(&self, courses: &[Course]) -> Result<(), AppError> {
        match self.storage.save(courses).await {
            Ok(()) => {
                tracing::debug!("Saved {} courses to {}", courses.len(), self.storage.describe());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error saving courses to {}: {}", self.storage.describe(), e);
                Err(e)
            }
        }
    }

    /// Persist the current collection without mutating it.
    pub async fn flush(&self) -> Result<(), AppError> {
        let catalog = self.catalog.lock().await;
        self.persist(&catalog.courses).await
    }

    /// Number of courses currently held.
    pub async fn count(&self) -> usize {
        self.catalog.lock().await.courses.len()
    }

    /// List all courses in insertion order.
    pub async fn list(&self) -> Vec<Course> {
        self.catalog.lock().await.courses.clone()
    }

    /// Get a course by id.
    pub async fn get(&self, id: i64) -> Result<Course, AppError> {
        let catalog = self.catalog.lock().await;
        let index = catalog.position(id)?;
        Ok(catalog.courses[index].clone())
    }

    /// Create a new course with a freshly allocated id.
    pub async fn create(&self, request: CreateCourseRequest) -> Result<Course, AppError> {
        let mut catalog = self.catalog.lock().await;
        let id = catalog.course_ids.next_id()?;
        let course = request.into_course(id, Utc::now());

        catalog.courses.push(course.clone());
        self.persist(&catalog.courses).await?;

        tracing::info!("Created course {} ({})", course.id, course.title);
        Ok(course)
    }

    /// Merge `request` over an existing course.
    pub async fn update(&self, id: i64, request: UpdateCourseRequest) -> Result<Course, AppError> {
        let mut catalog = self.catalog.lock().await;
        let index = catalog.position(id)?;

        request.apply_to(&mut catalog.courses[index]);
        let course = catalog.courses[index].clone();
        self.persist(&catalog.courses).await?;

        tracing::info!("Updated course {}", id);
        Ok(course)
    }

    /// Remove a course.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut catalog = self.catalog.lock().await;
        let index = catalog.position(id)?;

        catalog.courses.remove(index);
        self.persist(&catalog.courses).await?;

        tracing::info!("Deleted course {}", id);
        Ok(())
    }

    /// Append a module to a course and refresh the course's `updated_at`.
    pub async fn add_module(
        &self,
        course_id: i64,
        request: CreateModuleRequest,
    ) -> Result<Module, AppError> {
        let mut catalog = self.catalog.lock().await;
        let index = catalog.position(course_id)?;
        let module_id = catalog.module_ids.next_id()?;
        let module = request.into_module(module_id);

        let course = &mut catalog.courses[index];
        course.modules.push(module.clone());
        course.touch();
        self.persist(&catalog.courses).await?;

        tracing::info!("Added module '{}' to course {}", module.title, course_id);
        Ok(module)
    }

    /// Append every element of a JSON array as a new course with a fresh id.
    ///
    /// Nothing is inserted unless the whole payload is an array of course objects.
    pub async fn import_many(&self, payload: serde_json::Value) -> Result<Vec<Course>, AppError> {
        let serde_json::Value::Array(items) = payload else {
            return Err(AppError::InvalidInput("Invalid import data".to_string()));
        };

        let imported = items
            .into_iter()
            .map(serde_json::from_value::<ImportedCourse>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::InvalidInput(format!("Invalid import data: {}", e)))?;

        let mut catalog = self.catalog.lock().await;
        let now = Utc::now();
        let mut inserted = Vec::with_capacity(imported.len());
        for item in imported {
            let id = catalog.course_ids.next_id()?;
            inserted.push(item.into_course(id, now));
        }

        catalog.courses.extend(inserted.iter().cloned());
        self.persist(&catalog.courses).await?;

        tracing::info!("Imported {} courses", inserted.len());
        Ok(inserted)
    }

    /// Serialize one course, named after its title and id.
    pub async fn export_one(&self, id: i64) -> Result<CourseExport, AppError> {
        let course = self.get(id).await?;
        CourseExport::new(course_file_name(&course.title, course.id), &course)
    }

    /// Serialize the full collection.
    pub async fn export_all(&self) -> Result<CourseExport, AppError> {
        let courses = self.list().await;
        CourseExport::new(
            all_courses_file_name(Utc::now().timestamp_millis()),
            &courses,
        )
    }
}
