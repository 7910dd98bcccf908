//! Claude API client for the Anthropic Messages API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{AiError, TextProvider};

const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
const MAX_TOKENS: u32 = 1024;

/// Client for the Anthropic Claude Messages API
#[derive(Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Individual content block within a reply
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Request body for the Messages API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

/// Response from the Messages API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

/// Error detail from the Messages API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ClaudeClient {
    /// Create a new client with the given API key
    pub fn new(http: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl TextProvider for ClaudeClient {
    fn name(&self) -> &str {
        "claude"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let request = ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AiError::Api {
                provider: "claude".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let response = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| AiError::Decode(e.to_string()))?;

        extract_text(&response)
    }
}

/// Extract the first text block from an API response
fn extract_text(response: &ApiResponse) -> Result<String, AiError> {
    for block in &response.content {
        if let ContentBlock::Text { text } = block {
            return Ok(text.clone());
        }
    }
    Err(AiError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skips_non_text_blocks() {
        let response: ApiResponse = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "Drink water."}
            ],
            "stop_reason": "end_turn"
        }))
        .unwrap();
        assert_eq!(extract_text(&response).unwrap(), "Drink water.");
    }
}
