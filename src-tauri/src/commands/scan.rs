use crate::error::AppError;
use crate::models::scan_types::{Category, SessionSnapshot};
use crate::services::analysis::Analyzer;
use crate::services::session_manager::SessionManager;
use crate::services::upload;
use log::warn;
use std::path::Path;
use tauri::{AppHandle, Emitter, State};

const STATE_EVENT: &str = "analysis-state";

fn emit_state(app: &AppHandle, snapshot: &SessionSnapshot) {
    if let Err(e) = app.emit(STATE_EVENT, snapshot) {
        warn!("Failed to emit {}: {}", STATE_EVENT, e);
    }
}

#[tauri::command]
pub async fn get_session(session: State<'_, SessionManager>) -> Result<SessionSnapshot, AppError> {
    Ok(session.full_snapshot().await)
}

#[tauri::command]
pub fn list_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

#[tauri::command]
pub async fn select_category(
    app: AppHandle,
    session: State<'_, SessionManager>,
    category: Category,
) -> Result<SessionSnapshot, AppError> {
    let snapshot = session.select_category(category).await;
    emit_state(&app, &snapshot);
    Ok(snapshot)
}

/// Drag-and-drop path: the front end hands over the file contents as base64
/// along with the browser-declared type.
#[tauri::command]
pub async fn submit_file(
    app: AppHandle,
    session: State<'_, SessionManager>,
    name: String,
    data: String,
    mime_type: String,
) -> Result<SessionSnapshot, AppError> {
    let bytes = upload::decode_payload(&name, &data)?;
    let snapshot = session.submit_file(name, bytes, &mime_type).await?;
    emit_state(&app, &snapshot);
    Ok(snapshot)
}

/// File-picker path: the dialog plugin returns a path and the type is guessed
/// from its extension.
#[tauri::command]
pub async fn open_scan(
    app: AppHandle,
    session: State<'_, SessionManager>,
    path: String,
) -> Result<SessionSnapshot, AppError> {
    let snapshot = session.submit_path(Path::new(&path)).await?;
    emit_state(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub async fn analyze_scan(
    app: AppHandle,
    session: State<'_, SessionManager>,
    analyzer: State<'_, Analyzer>,
) -> Result<SessionSnapshot, AppError> {
    let finished = analyzer
        .run_shared(session.inner(), |running| emit_state(&app, running))
        .await;

    match finished {
        Some(snapshot) => {
            emit_state(&app, &snapshot);
            Ok(snapshot)
        }
        None => Ok(session.snapshot().await),
    }
}
