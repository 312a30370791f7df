// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers::quiz, state::AppState};

/// Assembles the quiz API router.
///
/// * `GET /api/questions` serves the bank without answer keys.
/// * `POST /api/submit` grades an ordered answer list.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/questions", get(quiz::get_questions))
        .route("/submit", post(quiz::submit_answers));

    Router::new()
        .nest("/api", api_routes)
        .fallback(quiz::not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
