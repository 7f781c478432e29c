//! Response envelopes and payload shapes for HTTP endpoints.

use serde::Serialize;

/// Consistent API response wrapper for success responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always true for success responses
    pub success: bool,
    /// Response data
    pub data: T,
}

/// Consistent API error response wrapper
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code (HTTP status code as string)
    pub code: String,
    /// Error message
    pub message: String,
    /// Optional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Consistent error response wrapper
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false for error responses
    pub success: bool,
    /// Error information
    pub error: ApiError,
}

/// Payload returned after a successful enrollment.
#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub student_id: u64,
    pub course_id: u64,
}

/// Helper to create success response
pub fn success_response<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
    }
}

/// Helper to create error response
pub fn error_response(code: u16, message: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        error: ApiError {
            code: code.to_string(),
            message,
            details,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let body = serde_json::to_value(error_response(400, "Course is full".to_string(), None))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "error": {"code": "400", "message": "Course is full"}
            })
        );
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(success_response(EnrollmentResponse {
            student_id: 1,
            course_id: 2,
        }))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": true, "data": {"student_id": 1, "course_id": 2}})
        );
    }
}
