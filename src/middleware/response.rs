use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for API responses that automatically adds the success envelope:
/// `{success: true, data: ...}` or `{success: true, message: "..."}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    payload: Payload<T>,
    status_code: StatusCode,
}

#[derive(Debug)]
enum Payload<T> {
    Data(T),
    Message(String),
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with a data payload
    pub fn success(data: T) -> Self {
        Self {
            payload: Payload::Data(data),
            status_code: StatusCode::OK,
        }
    }

    /// 201 Created with a data payload
    pub fn created(data: T) -> Self {
        Self {
            payload: Payload::Data(data),
            status_code: StatusCode::CREATED,
        }
    }
}

impl ApiResponse<()> {
    /// 200 OK with a confirmation message instead of data
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            payload: Payload::Message(message.into()),
            status_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = match self.payload {
            Payload::Data(data) => match serde_json::to_value(&data) {
                Ok(value) => json!({ "success": true, "data": value }),
                Err(e) => {
                    tracing::error!("failed to serialize response data: {}", e);
                    return crate::error::ApiError::internal().into_response();
                }
            },
            Payload::Message(message) => json!({ "success": true, "message": message }),
        };

        (self.status_code, Json(envelope)).into_response()
    }
}

/// Handler return type: success envelope or an ApiError envelope
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
