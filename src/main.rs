#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows release builds

mod commands;

use anyhow::Context;
use tauri::Manager;
use tracing_subscriber::EnvFilter;

use commands::{export, records, view};
use operator_desk::{
    config::{load_config_or_default, CONFIG_FILE_NAME},
    AppState,
};

fn setup(app: &mut tauri::App) -> anyhow::Result<()> {
    let config_path = tauri::api::path::app_config_dir(&app.config())
        .context("failed to resolve app config dir")?
        .join(CONFIG_FILE_NAME);
    let config = load_config_or_default(&config_path)?;
    tracing::info!(base_url = %config.api.base_url, "starting operator desk");

    let state = AppState::new(config)?;
    app.manage(state);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tauri::Builder::new()
        .setup(|app| {
            setup(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            records::load_records,
            records::fetch_status,
            records::query_table,
            view::get_view_state,
            view::dispatch,
            view::set_page,
            view::set_rows_per_page,
            view::set_sort,
            view::toggle_sort,
            view::set_search,
            view::set_working,
            view::set_date_from,
            view::set_date_to,
            export::export_table
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
