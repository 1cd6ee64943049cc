pub mod ai_service;
pub mod chat_service;
pub mod config_service;
pub mod llm_client;
