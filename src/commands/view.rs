use serde::Deserialize;
use tauri::State;

use operator_desk::{
    models::{TableSort, TableState, WorkingFilter},
    AppState, TableAction,
};

#[derive(Debug, Deserialize)]
pub struct SortPayload {
    #[serde(rename = "orderBy")]
    pub order_by: String,
}

#[tauri::command]
pub fn get_view_state(state: State<AppState>) -> TableState {
    state.view.snapshot()
}

#[tauri::command]
pub fn dispatch(state: State<AppState>, action: TableAction) -> TableState {
    state.view.dispatch(action)
}

#[tauri::command]
pub fn set_page(state: State<AppState>, page: i64) -> TableState {
    state.view.dispatch(TableAction::SetPage(page))
}

#[tauri::command]
pub fn set_rows_per_page(state: State<AppState>, rows_per_page: usize) -> TableState {
    state.view.dispatch(TableAction::SetRowsPerPage(rows_per_page))
}

#[tauri::command]
pub fn set_sort(state: State<AppState>, sort: TableSort) -> TableState {
    state.view.dispatch(TableAction::SetSort(sort))
}

/// Column-header click.
#[tauri::command]
pub fn toggle_sort(state: State<AppState>, payload: SortPayload) -> TableState {
    state.view.toggle_sort(&payload.order_by)
}

#[tauri::command]
pub fn set_search(state: State<AppState>, search: String) -> TableState {
    state.view.dispatch(TableAction::SetSearch(search))
}

#[tauri::command]
pub fn set_working(state: State<AppState>, working: WorkingFilter) -> TableState {
    state.view.dispatch(TableAction::SetWorking(working))
}

#[tauri::command]
pub fn set_date_from(state: State<AppState>, date_from: Option<String>) -> TableState {
    state.view.dispatch(TableAction::SetDateFrom(date_from))
}

#[tauri::command]
pub fn set_date_to(state: State<AppState>, date_to: Option<String>) -> TableState {
    state.view.dispatch(TableAction::SetDateTo(date_to))
}
