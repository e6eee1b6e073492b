use crate::errors::AppError;
use crate::models::Session;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub const DEFAULT_DATA_PATH: &str = "poker-sessions.json";
pub const DEFAULT_PORT: u16 = 3000;

pub fn resolve_data_path() -> PathBuf {
    env::var("APP_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH))
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Reads the session file, falling back to an empty list when it is missing
/// or unreadable.
pub async fn load_sessions(path: &Path) -> Vec<Session> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(sessions) => sessions,
            Err(err) => {
                error!("failed to parse data file: {err}");
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Vec::new()
        }
    }
}

/// Overwrites the whole session file.
pub async fn persist_sessions(path: &Path, sessions: &[Session]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(sessions).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    info!(
        "saved {} sessions to {}",
        sessions.len(),
        path.display()
    );
    Ok(())
}
