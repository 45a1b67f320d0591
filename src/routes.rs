use crate::handlers::{
    api_method_not_allowed, api_not_found, category_questions, create_question, delete_question,
    list_categories, list_questions, play_quiz, search_questions,
};
use crate::observability::health_handler;
use crate::openapi::openapi_handler;
use crate::state::AppState;
use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Every API route lives under this prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Routes under [`API_PREFIX`]. Unknown paths and wrong methods answer with
/// the JSON error envelope.
fn api_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .route("/quizzes", post(play_quiz))
        .method_not_allowed_fallback(api_method_not_allowed)
        .fallback(api_not_found)
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX, api_router())
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}
