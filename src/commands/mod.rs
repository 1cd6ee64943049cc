mod chat;
mod config;

pub use chat::*;
pub use config::*;
