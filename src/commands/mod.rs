//! `#[tauri::command]` handlers. Reference them by module path in
//! `generate_handler!` so the generated `__cmd__*` macros resolve.

pub mod export;
pub mod records;
pub mod view;
