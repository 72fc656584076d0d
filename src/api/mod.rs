//! REST API module.
//!
//! Handlers return bare JSON documents on success and `{error, code}` bodies on
//! failure via [`AppError`]'s `IntoResponse`.

mod courses;
mod health;
mod transfer;

pub use courses::*;
pub use health::*;
pub use transfer::*;

use crate::errors::AppError;

/// Response type for every API handler.
pub type ApiResult<T> = Result<T, AppError>;

/// Parse a path id. Anything that is not an integer cannot name a course.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::course_not_found())
}
