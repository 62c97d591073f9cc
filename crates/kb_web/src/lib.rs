use axum::{routing::get, Router};
use kb_core::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Path the widget has always called; kept next to the API route.
pub const LEGACY_ASK_PATH: &str = "/.netlify/functions/scrape";

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/ask", get(handlers::ask))
        .route(LEGACY_ASK_PATH, get(handlers::ask))
        .route("/api/articles", get(handlers::list_articles))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use kb_core::{Article, Error, Result};
    pub use crate::AppState;
}
