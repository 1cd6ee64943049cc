use crate::models::{Speaker, Turn};
use crate::services::config_service::{self, EffectiveConfig};
use crate::services::llm_client::{ChatMessage, LlmClient};

/// Style instruction prepended to every request.
const SYSTEM_PROMPT: &str = "你是一位友好、专业的AI助手。请用简洁的中文回答，\
适当使用 Markdown 结构（小标题、要点列表、**重点加粗**），避免冗长的铺垫，直接给出答案。";

/// Turn one pending user message plus bounded history into exactly one
/// assistant reply. Every failure is absorbed into the fallback text, so
/// the caller always gets something to append.
pub async fn complete(history: &[Turn], new_user_text: &str) -> String {
    let config = config_service::effective_config();
    complete_with(&config, history, new_user_text).await
}

async fn complete_with(config: &EffectiveConfig, history: &[Turn], new_user_text: &str) -> String {
    let client = LlmClient::from_config(config);
    let messages = build_messages(history, new_user_text);

    match client.chat_completion(messages).await {
        Ok(reply) => reply,
        Err(err) => {
            log::warn!("chat completion failed: {}", err);
            fallback_reply(&config.base_url)
        }
    }
}

/// System instruction first, then the bounded history mapped to wire
/// roles, then the new user text as the final entry.
fn build_messages(history: &[Turn], new_user_text: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(LlmClient::system_message(SYSTEM_PROMPT));

    for turn in history {
        let mapped = match turn.speaker {
            Speaker::User => LlmClient::user_message(&turn.text),
            Speaker::Assistant => LlmClient::assistant_message(&turn.text),
        };
        messages.push(mapped);
    }

    messages.push(LlmClient::user_message(new_user_text));
    messages
}

/// Deterministic assistant text shown when the service cannot be reached,
/// structured like a normal reply so the rendering layer needs no special
/// case.
fn fallback_reply(endpoint: &str) -> String {
    format!(
        "## 连接失败\n\n\
         抱歉，我暂时无法连接到 AI 服务。\n\n\
         - 接口地址：{}\n\
         - 可能原因：网络不可用，或服务暂时无响应\n\n\
         请稍后重试，*您的消息已保留在当前对话中*。",
        endpoint
    )
}
