use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::config_service::EffectiveConfig;

/// Output-length cap and sampling temperature for every request. The
/// widget has no per-message knobs.
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for an OpenAI-compatible chat completion endpoint. One request
/// per exchange, never streamed.
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300)) // long generations
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &EffectiveConfig) -> Self {
        Self::new(&config.base_url, &config.api_key, &config.model)
    }

    /// Send one chat completion request and return the reply content.
    ///
    /// Non-2xx statuses are failures in their own right; the body is never
    /// parsed for them.
    pub async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        };

        let response = self
            .client
            .post(completions_url(&self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("API error ({}): {}", status, error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        extract_reply(completion)
    }

    /// Helper to create a system message
    pub fn system_message(content: &str) -> ChatMessage {
        ChatMessage {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    /// Helper to create a user message
    pub fn user_message(content: &str) -> ChatMessage {
        ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    /// Helper to create an assistant message
    pub fn assistant_message(content: &str) -> ChatMessage {
        ChatMessage {
            role: "assistant".to_string(),
            content: content.to_string(),
        }
    }
}

/// Build the full URL - append /chat/completions unless the base URL
/// already includes it.
fn completions_url(base_url: &str) -> String {
    if base_url.contains("/chat/completions") {
        base_url.to_string()
    } else {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }
}

/// A usable reply has at least one choice with non-empty content.
/// Anything else counts as a malformed response.
fn extract_reply(completion: ChatCompletionResponse) -> Result<String, String> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| "No response content".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<String, String> {
        let completion: ChatCompletionResponse =
            serde_json::from_str(body).map_err(|e| format!("Failed to parse response: {}", e))?;
        extract_reply(completion)
    }

    #[test]
    fn success_shape_yields_the_content_verbatim() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"X"}}]}"#;
        assert_eq!(parse(body).unwrap(), "X");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = r#"{
            "id": "cmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "你好"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        assert_eq!(parse(body).unwrap(), "你好");
    }

    #[test]
    fn missing_choices_is_a_failure() {
        assert!(parse(r#"{"id":"cmpl-1"}"#).is_err());
        assert!(parse(r#"{"choices":[]}"#).is_err());
    }

    #[test]
    fn empty_content_is_a_failure() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":""}}]}"#;
        assert!(parse(body).is_err());
    }

    #[test]
    fn unexpected_shape_is_a_failure() {
        assert!(parse(r#"{"error":{"message":"invalid api key"}}"#).is_err());
        assert!(parse("not json at all").is_err());
    }

    #[test]
    fn completions_url_joins_the_base() {
        assert_eq!(
            completions_url("https://api.deepseek.com/v1"),
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("https://api.deepseek.com/v1/"),
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("https://example.com/v1/chat/completions"),
            "https://example.com/v1/chat/completions"
        );
    }

    #[test]
    fn request_body_carries_the_fixed_parameters() {
        let request = ChatCompletionRequest {
            model: "deepseek-chat".to_string(),
            messages: vec![LlmClient::user_message("hi")],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hi");
    }
}
