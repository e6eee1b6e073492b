use crate::board::build_board;
use crate::errors::AppError;
use crate::models::{BoardResponse, EntryRequest, EntryResponse, SaveResponse, Session, STARTING_CHIPS};
use crate::state::AppState;
use crate::storage::persist_sessions;
use crate::store::SessionStore;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use tokio::fs;
use tracing::{error, info};

pub async fn index() -> Html<String> {
    Html(render_index())
}

/// Serves the backing file as stored on disk; a missing file is a 404.
pub async fn get_sessions_file(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    match fs::read(&state.data_path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "application/json")], bytes)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::not_found("no sessions saved yet"))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Session>>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(sessions) = payload?;
    let mut store = state.store.lock().await;
    if let Err(err) = persist_sessions(&state.data_path, &sessions).await {
        error!("error saving data: {}", err.message);
        return Err(err);
    }
    store.replace_all(sessions);

    Ok(Json(SaveResponse {
        success: true,
        message: "Data saved successfully".to_string(),
    }))
}

pub async fn get_board(State(state): State<AppState>) -> Json<BoardResponse> {
    let store = state.store.lock().await;
    Json(build_board(store.sessions()))
}

pub async fn add_entry(
    State(state): State<AppState>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> Result<Json<EntryResponse>, AppError> {
    let Json(payload) = payload?;
    let date = payload.date.trim();
    let player = payload.player.trim();
    if date.is_empty() {
        return Err(AppError::bad_request("date is required"));
    }
    if player.is_empty() {
        return Err(AppError::bad_request("player is required"));
    }
    let starting = payload.starting.unwrap_or(STARTING_CHIPS);

    let mut store = state.store.lock().await;
    store.upsert_entry(date, player, starting, payload.ending);
    info!("recorded {player} on {date}: {starting} -> {}", payload.ending);

    let saved = persist_logged(&state, &store).await;
    Ok(Json(EntryResponse {
        saved,
        board: build_board(store.sessions()),
    }))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<BoardResponse>, AppError> {
    let mut store = state.store.lock().await;
    if store.delete_session(&date).is_none() {
        return Err(AppError::not_found(format!("no session on {date}")));
    }
    info!("deleted session {date}");

    persist_logged(&state, &store).await;
    Ok(Json(build_board(store.sessions())))
}

pub async fn clear_sessions(State(state): State<AppState>) -> Json<BoardResponse> {
    let mut store = state.store.lock().await;
    store.clear();
    info!("cleared all sessions");

    persist_logged(&state, &store).await;
    Json(build_board(store.sessions()))
}

/// Persists after a mutation. The mutation stays in memory even when the
/// write fails.
async fn persist_logged(state: &AppState, store: &SessionStore) -> bool {
    match persist_sessions(&state.data_path, store.sessions()).await {
        Ok(()) => true,
        Err(err) => {
            error!("failed to save sessions: {}", err.message);
            false
        }
    }
}
