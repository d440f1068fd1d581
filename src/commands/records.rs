use serde::Deserialize;
use tauri::State;

use operator_desk::{feed::FeedStatus, table::TableView, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct LoadRecordsPayload {
    /// Skip the result cache and go to the network.
    #[serde(default)]
    pub force: bool,
}

/// Fetches operators and addons concurrently and reports how each list settled.
#[tauri::command]
pub async fn load_records(
    state: State<'_, AppState>,
    payload: Option<LoadRecordsPayload>,
) -> Result<FeedStatus, String> {
    let force = payload.map(|p| p.force).unwrap_or(false);
    Ok(state.load_records(force).await)
}

#[tauri::command]
pub fn fetch_status(state: State<AppState>) -> FeedStatus {
    state.feed.snapshot().status()
}

/// Columns, the current page of rows (or loading/error/empty) and pagination.
#[tauri::command]
pub fn query_table(state: State<AppState>) -> TableView {
    state.table_view()
}
