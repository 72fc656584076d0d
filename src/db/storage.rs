//! Backing media for the course collection.
//!
//! Every backend stores the whole collection as one JSON document and rewrites it
//! wholesale on save.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::Course;

/// Slot key under which the client store keeps its collection.
pub const COURSES_SLOT: &str = "courses";

/// A medium that can load and overwrite the full course collection.
#[async_trait]
pub trait CourseStorage: Send + Sync {
    /// Read the stored collection. A medium that has never been written yields an empty list.
    async fn load(&self) -> Result<Vec<Course>, AppError>;

    /// Replace the stored collection with `courses`.
    async fn save(&self, courses: &[Course]) -> Result<(), AppError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Open the file store, creating its parent directory if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        ensure_parent_dir(&path).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[async_trait]
impl CourseStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<Course>, AppError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn save(&self, courses: &[Course]) -> Result<(), AppError> {
        let body = serde_json::to_string_pretty(courses)
            .map_err(|e| AppError::Storage(format!("Failed to serialize courses: {}", e)))?;
        ensure_parent_dir(&self.path).await?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// One key of a SQLite key/value table holding the JSON array.
#[derive(Debug, Clone)]
pub struct SlotStorage {
    pool: SqlitePool,
    key: String,
}

impl SlotStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_key(pool, COURSES_SLOT)
    }

    pub fn with_key(pool: SqlitePool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }
}

#[async_trait]
impl CourseStorage for SlotStorage {
    async fn load(&self) -> Result<Vec<Course>, AppError> {
        let row = sqlx::query("SELECT value FROM slots WHERE key = ?")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };
        let raw: String = row.get("value");

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!("Failed to parse slot '{}': {}", self.key, e))
        })
    }

    async fn save(&self, courses: &[Course]) -> Result<(), AppError> {
        let body = serde_json::to_string(courses)
            .map_err(|e| AppError::Storage(format!("Failed to serialize courses: {}", e)))?;
        let now = Utc::now();

        sqlx::query(
            r#"INSERT INTO slots (key, value, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(&self.key)
        .bind(&body)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn describe(&self) -> String {
        format!("slot '{}'", self.key)
    }
}
