//! Export and import endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{parse_id, ApiResult};
use crate::db::CourseExport;
use crate::models::Course;
use crate::AppState;

/// Body of a successful import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub courses: Vec<Course>,
}

/// Serve an export as a JSON file attachment.
fn attachment(export: CourseExport) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response()
}

/// GET /api/courses/:id/export - Download one course.
pub async fn export_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let export = state.repo.export_one(parse_id(&id)?).await?;
    Ok(attachment(export))
}

/// GET /api/courses/export/all - Download the whole collection.
pub async fn export_all_courses(State(state): State<AppState>) -> ApiResult<Response> {
    let export = state.repo.export_all().await?;
    Ok(attachment(export))
}

/// POST /api/courses/import - Append an array of courses with fresh ids.
pub async fn import_courses(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ImportResponse>)> {
    let Json(payload) = payload?;
    let courses = state.repo.import_many(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            message: format!("Successfully imported {} courses", courses.len()),
            courses,
        }),
    ))
}
