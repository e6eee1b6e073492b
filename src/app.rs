use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/poker-sessions.json", get(handlers::get_sessions_file))
        .route("/api/save", post(handlers::save))
        .route("/api/board", get(handlers::get_board))
        .route("/api/entries", post(handlers::add_entry))
        .route("/api/sessions", delete(handlers::clear_sessions))
        .route("/api/sessions/:date", delete(handlers::delete_session))
        .with_state(state)
}
