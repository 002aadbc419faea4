//! Task endpoints.
//!
//! Validation and not-found checks happen here, before the store is touched.

use super::response::ApiResponse;
use super::server::ApiState;
use crate::error::{ApiError, ApiResult};
use crate::messages::{error as err_msg, success as ok_msg};
use crate::types::{NewTask, Task};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::Value;
use tracing::info;

/// Validate a create request body.
///
/// The title must be a non-blank string. A description, when the key is
/// present at all, must be a string. Both are trimmed.
pub fn parse_new_task(body: &Value) -> ApiResult<NewTask> {
    let title = body
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(ApiError::title_required)?;

    let description = match body.get("description") {
        None => None,
        Some(Value::String(d)) => Some(d.trim()),
        Some(_) => return Err(ApiError::invalid_description()),
    };

    Ok(NewTask::new(title, description))
}

/// Parse an integer written with a `0x`, `0b` or `0o` prefix.
///
/// Returns `None` when `raw` has no such prefix.
fn parse_prefixed_id(raw: &str) -> Option<ApiResult<i64>> {
    let radix = match raw.get(..2)? {
        "0x" | "0X" => 16,
        "0b" | "0B" => 2,
        "0o" | "0O" => 8,
        _ => return None,
    };

    let digits = &raw[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(Err(ApiError::invalid_id()));
    }
    // Digits are valid, so the only failure left is overflow.
    Some(i64::from_str_radix(digits, radix).map_err(|_| ApiError::NotFound))
}

/// Parse a task id taken from the request path.
///
/// Accepts what a JavaScript `Number()` conversion accepts: decimal numbers
/// with optional sign, fraction and exponent, `0x`/`0b`/`0o` integers, the
/// exact spellings `Infinity`/`+Infinity`/`-Infinity`, and blank input (zero).
/// Anything else is a validation error. A number that can never be a row id
/// (fractional, infinite, out of range) is reported as not found.
pub fn parse_task_id(raw: &str) -> ApiResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }
    if let Some(id) = parse_prefixed_id(raw) {
        return id;
    }
    if matches!(raw, "Infinity" | "+Infinity" | "-Infinity") {
        return Err(ApiError::NotFound);
    }

    // `f64::from_str` also takes `inf`/`nan` in any case; those are not ids.
    if !raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return Err(ApiError::invalid_id());
    }
    let value: f64 = raw.parse().map_err(|_| ApiError::invalid_id())?;
    if !value.is_finite()
        || value.fract() != 0.0
        || value < i64::MIN as f64
        || value >= i64::MAX as f64
    {
        return Err(ApiError::NotFound);
    }
    Ok(value as i64)
}

/// Extract the raw `{id}` segment. Undecodable paths are invalid ids.
fn raw_id(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    path.map(|Path(raw)| raw)
        .map_err(|_| ApiError::invalid_id())
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<ApiState>) -> ApiResult<Json<ApiResponse<Vec<Task>>>> {
    let tasks = state
        .db()
        .list_tasks()
        .map_err(|e| ApiError::store(err_msg::FETCH, e))?;

    Ok(Json(ApiResponse::ok(ok_msg::FETCHED, tasks)))
}

/// POST /api/tasks
///
/// A missing or malformed JSON body is treated as an empty object.
pub async fn create_task(
    State(state): State<ApiState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Task>>)> {
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);
    let new_task = parse_new_task(&body)?;

    let task = state
        .db()
        .create_task(&new_task)
        .map_err(|e| ApiError::store(err_msg::CREATE, e))?;

    info!(task_id = task.id, "Task created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ok_msg::CREATED, task)),
    ))
}

/// PATCH /api/tasks/{id}/toggle
pub async fn toggle_task(
    State(state): State<ApiState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task_id = parse_task_id(&raw_id(path)?)?;

    let task = state
        .db()
        .toggle_task(task_id)
        .map_err(|e| ApiError::store(err_msg::TOGGLE, e))?
        .ok_or(ApiError::NotFound)?;

    info!(task_id, completed = task.completed, "Task toggled");
    Ok(Json(ApiResponse::ok(ok_msg::TOGGLED, task)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<ApiState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let task_id = parse_task_id(&raw_id(path)?)?;

    let deleted = state
        .db()
        .delete_task(task_id)
        .map_err(|e| ApiError::store(err_msg::DELETE, e))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!(task_id, "Task deleted");
    Ok(Json(ApiResponse::message_only(ok_msg::DELETED)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rejection(result: ApiResult<NewTask>) -> &'static str {
        result.unwrap_err().public_message()
    }

    #[test]
    fn test_parse_new_task_trims_fields() {
        let task = parse_new_task(&json!({ "title": "  Buy milk ", "description": " 2L " })).unwrap();
        assert_eq!(task, NewTask::new("Buy milk", Some("2L")));
    }

    #[test]
    fn test_parse_new_task_without_description() {
        let task = parse_new_task(&json!({ "title": "Buy milk" })).unwrap();
        assert_eq!(task.description, None);
    }

    #[test]
    fn test_parse_new_task_rejects_bad_titles() {
        for body in [
            json!({}),
            json!({ "title": "" }),
            json!({ "title": "   " }),
            json!({ "title": 42 }),
            json!({ "title": null }),
            json!({ "title": ["a"] }),
            json!("Buy milk"),
            Value::Null,
        ] {
            assert_eq!(
                rejection(parse_new_task(&body)),
                err_msg::TITLE_REQUIRED,
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_parse_new_task_rejects_non_string_description() {
        for description in [json!(1), json!(true), json!(null), json!({})] {
            let body = json!({ "title": "ok", "description": description });
            assert_eq!(
                rejection(parse_new_task(&body)),
                err_msg::INVALID_DESCRIPTION
            );
        }
    }

    #[test]
    fn test_title_checked_before_description() {
        let body = json!({ "title": " ", "description": 5 });
        assert_eq!(rejection(parse_new_task(&body)), err_msg::TITLE_REQUIRED);
    }

    #[test]
    fn test_parse_task_id_accepts_integers() {
        assert_eq!(parse_task_id("12").unwrap(), 12);
        assert_eq!(parse_task_id(" 12 ").unwrap(), 12);
        assert_eq!(parse_task_id("+12").unwrap(), 12);
        assert_eq!(parse_task_id("1e3").unwrap(), 1000);
        assert_eq!(parse_task_id("4.0").unwrap(), 4);
        assert_eq!(parse_task_id("  ").unwrap(), 0);
    }

    #[test]
    fn test_parse_task_id_accepts_prefixed_integers() {
        assert_eq!(parse_task_id("0x1").unwrap(), 1);
        assert_eq!(parse_task_id("0X1f").unwrap(), 31);
        assert_eq!(parse_task_id("0b1").unwrap(), 1);
        assert_eq!(parse_task_id("0B101").unwrap(), 5);
        assert_eq!(parse_task_id("0o7").unwrap(), 7);
        assert_eq!(parse_task_id("0O17").unwrap(), 15);
    }

    #[test]
    fn test_parse_task_id_rejects_non_numbers() {
        for raw in [
            "abc", "12abc", "NaN", "nan", "inf", "INFINITY", "infinity", "-inf", "Infinityx",
            "0x", "0xZZ", "0b2", "0o8", "-0x1", "1e", "--1",
        ] {
            assert!(
                matches!(parse_task_id(raw), Err(ApiError::Validation(_))),
                "raw: {raw}"
            );
        }
    }

    #[test]
    fn test_parse_task_id_unmatchable_numbers_are_not_found() {
        for raw in [
            "1.5",
            "Infinity",
            "+Infinity",
            "-Infinity",
            "1e300",
            "1e400",
            "0xffffffffffffffffff",
        ] {
            assert!(
                matches!(parse_task_id(raw), Err(ApiError::NotFound)),
                "raw: {raw}"
            );
        }
    }
}
