//! Uniform JSON envelope shared by every endpoint.

use crate::error::ApiError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

/// `{ success, message?, data? }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with no `data` field.
    pub fn message_only(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store { message, source } => error!("{}: {:#}", message, source),
            _ => debug!(error = %self, "Request rejected"),
        }

        let body = ApiResponse::failure(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_omits_data() {
        let json = serde_json::to_value(ApiResponse::failure("Task not found")).unwrap();
        assert_eq!(json, json!({ "success": false, "message": "Task not found" }));
    }

    #[test]
    fn test_message_only_omits_data() {
        let json =
            serde_json::to_value(ApiResponse::message_only("Task deleted successfully")).unwrap();
        assert_eq!(
            json,
            json!({ "success": true, "message": "Task deleted successfully" })
        );
    }

    #[test]
    fn test_ok_includes_data() {
        let json = serde_json::to_value(ApiResponse::ok("done", vec![1, 2])).unwrap();
        assert_eq!(json["success"], json!(true));
        assert_eq!(json["data"], json!([1, 2]));
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::invalid_id().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::store("Failed to fetch tasks", anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
