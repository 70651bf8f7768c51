//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse for AppError` impl and its helpers live in
//! `shiptrack-core` (the crate that owns `AppError`) to satisfy the orphan
//! rule; they are re-exported here for the API layer.

pub use shiptrack_core::error::{status_for_kind, ApiErrorResponse};

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use shiptrack_core::error::{status_for_kind, AppError, ErrorKind};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for_kind(ErrorKind::Validation).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for_kind(ErrorKind::Authentication).0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for_kind(ErrorKind::Authorization).0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for_kind(ErrorKind::NotFound).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for_kind(ErrorKind::Conflict).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for_kind(ErrorKind::Database).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for_kind(ErrorKind::Internal).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_generic() {
        let response = AppError::database("connection refused at 10.0.0.5").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
