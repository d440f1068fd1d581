use std::path::PathBuf;

use serde::Deserialize;
use tauri::State;

use operator_desk::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct ExportTablePayload {
    pub destination: String,
}

/// Exports every filtered row in the current sort order to a CSV file.
#[tauri::command]
pub fn export_table(state: State<AppState>, payload: ExportTablePayload) -> Result<usize, String> {
    let destination = PathBuf::from(payload.destination);
    if destination.as_os_str().is_empty() {
        return Err(AppError::Message("Export destination is empty.".into()).into());
    }
    let rows = state.export_table(&destination)?;
    Ok(rows)
}
