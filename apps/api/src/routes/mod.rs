pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/questions", post(handlers::handle_create_question))
        .route(
            "/api/v1/questions/:id/image",
            get(handlers::handle_question_image),
        )
        .route(
            "/api/v1/questions/:id/answer",
            post(handlers::handle_answer),
        )
        .route("/api/v1/postback", post(handlers::handle_postback))
        .route("/api/v1/menus/default", get(handlers::handle_default_menu))
        .with_state(state)
}
