use crate::models::Turn;
use crate::services::{ai_service, chat_service::ChatSession};
use crate::AppState;
use tauri::State;

#[tauri::command]
pub fn get_conversation(state: State<'_, AppState>) -> Result<Vec<Turn>, String> {
    let session = state
        .session
        .lock()
        .map_err(|_| "Chat session is unavailable".to_string())?;
    Ok(session.turns().to_vec())
}

/// Discard the current conversation and reseed the greeting. The frontend
/// calls this on load so a page reload starts a fresh session.
#[tauri::command]
pub fn new_conversation(state: State<'_, AppState>) -> Result<Vec<Turn>, String> {
    let mut session = state
        .session
        .lock()
        .map_err(|_| "Chat session is unavailable".to_string())?;

    if session.is_pending() {
        return Err("A reply is still pending".to_string());
    }

    *session = ChatSession::new();
    Ok(session.turns().to_vec())
}

/// Submit one user message and return the full conversation once the
/// assistant turn (reply or fallback) has been appended. Blank input is a
/// no-op; a submission while a reply is pending is rejected.
#[tauri::command]
pub async fn send_message(state: State<'_, AppState>, text: String) -> Result<Vec<Turn>, String> {
    let draft = text.trim().to_string();

    // Lock only to mutate; the completion call itself runs without it.
    let context = {
        let mut session = state
            .session
            .lock()
            .map_err(|_| "Chat session is unavailable".to_string())?;
        match session.begin_exchange(&draft)? {
            Some(context) => context,
            None => return Ok(session.turns().to_vec()),
        }
    };

    let reply = ai_service::complete(&context, &draft).await;

    let mut session = state
        .session
        .lock()
        .map_err(|_| "Chat session is unavailable".to_string())?;
    session.finish_exchange(reply);
    Ok(session.turns().to_vec())
}
