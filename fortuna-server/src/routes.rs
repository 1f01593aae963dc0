use axum::{routing::{get, post}, Router, Extension};
use fortuna_core::{PARTICIPANTS_PATH, RUNNING_STREAMS_PATH};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{AppState, health_with_pool};
use crate::controllers;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|Extension(state): Extension<Arc<AppState>>| async move {
            health_with_pool(&state.pool).await
        }))
        .route(RUNNING_STREAMS_PATH, get(controllers::running_streams))
        .route(PARTICIPANTS_PATH, post(controllers::participants))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
