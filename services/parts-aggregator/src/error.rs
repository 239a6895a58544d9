use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use partlink_utils::{ErrorResponse, PartlinkError};

/// HTTP-facing wrapper so handlers can return `PartlinkError` with `?`.
#[derive(Debug)]
pub struct ApiError(pub PartlinkError);

impl From<PartlinkError> for ApiError {
    fn from(error: PartlinkError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
