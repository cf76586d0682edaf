use axum::{Json, response::IntoResponse};
use reqwest::StatusCode;
use serde_json::json;

pub type Result<T> = core::result::Result<T, Error>;

/// 请求级错误，直接映射为 HTTP 状态码
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// 统一的错误响应体 `{"error": "..."}`
fn error_body(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            // 会话解析失败一律视为未登录，认证服务是会话的唯一权威
            Error::Reqwest(e) => {
                tracing::warn!(%e, "auth provider unreachable");
                error_body(StatusCode::UNAUTHORIZED, ApiError::Unauthorized.to_string())
            }
            Error::Api(api_error) => error_body(api_error.status(), api_error.to_string()),
        }
    }
}
