//! Liveness payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub courses_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    pub fn healthy(courses_count: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            courses_count,
            timestamp: Utc::now(),
        }
    }
}
