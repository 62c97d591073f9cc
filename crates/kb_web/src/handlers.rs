use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use kb_core::Article;
use kb_inference::Classifier;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AskParams {
    pub query: Option<String>,
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AskParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let query = params
        .map_err(|rejection| {
            debug!("Rejected query string: {}", rejection);
            ApiError::MissingQuery
        })?
        .0
        .query
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingQuery)?;
    debug!("Query: {:?}", query);

    // Cheap rejections never touch the knowledge base.
    if let Some(answer) = Classifier::screen(&query) {
        return Ok(Json(answer.to_json()));
    }

    let articles = state.storage.load().await.map_err(ApiError::KnowledgeBase)?;
    let answer = state
        .classifier
        .answer(&query, &articles)
        .await
        .map_err(ApiError::Classification)?;
    Ok(Json(answer.to_json()))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state.storage.load().await.map_err(ApiError::KnowledgeBase)?;
    Ok(Json(articles))
}
