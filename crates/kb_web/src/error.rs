use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Failures of the query endpoint, each mapped to a coarse status code.
#[derive(Debug)]
pub enum ApiError {
    MissingQuery,
    KnowledgeBase(kb_core::Error),
    Classification(kb_core::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingQuery => (StatusCode::BAD_REQUEST, "Missing query parameter.".to_string()),
            ApiError::KnowledgeBase(err) => {
                error!("Could not read knowledge base: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not read articles.json".to_string(),
                )
            }
            ApiError::Classification(err) => {
                error!("Classification failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
