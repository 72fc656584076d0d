//! Course API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, ApiResult};
use crate::models::{Course, CreateCourseRequest, CreateModuleRequest, Module, UpdateCourseRequest};
use crate::AppState;

/// GET /api/courses - List all courses.
pub async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.repo.list().await)
}

/// GET /api/courses/:id - Get a single course.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Course>> {
    let course = state.repo.get(parse_id(&id)?).await?;
    Ok(Json(course))
}

/// POST /api/courses - Create a new course.
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let Json(request) = payload?;
    let course = state.repo.create(request).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/courses/:id - Update a course.
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> ApiResult<Json<Course>> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let course = state.repo.update(id, request).await?;
    Ok(Json(course))
}

/// DELETE /api/courses/:id - Delete a course.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.repo.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/courses/:id/modules - Append a module to a course.
pub async fn add_module(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateModuleRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Module>)> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let module = state.repo.add_module(id, request).await?;
    Ok((StatusCode::CREATED, Json(module)))
}
