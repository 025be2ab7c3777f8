use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Shared(#[from] homeplan_shared::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("missing x-tenant-id header")]
    MissingTenant,

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        use homeplan_shared::Error;

        match self {
            AppError::Shared(Error::NotFound(_)) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Shared(Error::Validate(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Shared(Error::User(_)) | AppError::MissingTenant => StatusCode::BAD_REQUEST,
            AppError::Shared(Error::Persistence(_) | Error::Server(_) | Error::Unknown(_))
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("{self:?}");
            "An unexpected error occurred. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
