use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::data::LoaderError;
use crate::scan::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Converts `AppError` into an HTTP response: bad thresholds are the
/// caller's fault, anything from the loader is ours.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(config_err) => {
                (StatusCode::BAD_REQUEST, config_err.to_string())
            }
            AppError::Loader(loader_err) => {
                tracing::error!(error = ?loader_err, "Chain load failed.");
                (StatusCode::INTERNAL_SERVER_ERROR, loader_err.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
