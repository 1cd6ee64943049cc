mod commands;
mod models;
mod services;

use std::sync::Mutex;

use commands::*;
use services::chat_service::ChatSession;

/// Session state shared across Tauri commands. One conversation per app
/// lifetime; `new_conversation` reseeds it.
pub struct AppState {
    pub session: Mutex<ChatSession>,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_log::Builder::new().build())
        .manage(AppState {
            session: Mutex::new(ChatSession::new()),
        })
        .invoke_handler(tauri::generate_handler![
            // Config commands
            get_config,
            set_api_key,
            set_base_url,
            set_model,
            // Chat commands
            get_conversation,
            new_conversation,
            send_message,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application")
}
