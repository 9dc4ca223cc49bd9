pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as deck_handlers;
use crate::auth::handlers as auth_handlers;
use crate::questions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/v1/auth/signup", post(auth_handlers::handle_signup))
        .route("/api/v1/auth/signin", post(auth_handlers::handle_signin))
        .route("/api/v1/auth/signout", post(auth_handlers::handle_signout))
        .route("/api/v1/auth/me", get(auth_handlers::handle_me))
        // Questionnaire API
        .route("/api/v1/questions", get(questions::handle_list_questions))
        // Deck analysis API
        .route("/api/v1/decks", get(deck_handlers::handle_list))
        .route("/api/v1/decks/:id", get(deck_handlers::handle_get))
        .route("/api/v1/decks/analyze", post(deck_handlers::handle_analyze))
        .route("/api/v1/decks/upload", post(deck_handlers::handle_upload))
        .route(
            "/api/v1/decks/questionnaire",
            post(deck_handlers::handle_questionnaire),
        )
        .route("/api/v1/advice/:category", get(deck_handlers::handle_advice))
        .with_state(state)
}
