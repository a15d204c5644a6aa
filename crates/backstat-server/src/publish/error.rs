//! JSON error responses for the HTTP surface.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use backstat_core::error::{BackstatError, ErrorCode};

/// Wraps a `BackstatError` so handlers can return it directly.
#[derive(Debug)]
pub struct ApiError(pub BackstatError);

impl From<BackstatError> for ApiError {
    fn from(e: BackstatError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = match code {
            ErrorCode::BadRequest | ErrorCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ErrorCode::Io | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({
            "code": code.as_str(),
            "msg": self.0.to_string(),
        })
        .to_string();

        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_error_is_500_with_json_body() {
        let res = ApiError(BackstatError::Internal("serialize snapshot: boom".into())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");

        let body = body_json(res).await;
        assert_eq!(body["code"], "INTERNAL");
        assert_eq!(body["msg"], "internal: serialize snapshot: boom");
    }

    #[tokio::test]
    async fn bad_request_is_400() {
        let res = ApiError::from(BackstatError::BadRequest("nope".into())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["code"], "BAD_REQUEST");
    }
}
