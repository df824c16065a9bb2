//! Anthropic Messages API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use roast_common::bounded::bounded;

use crate::{GenerationError, TextGenerator};

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Client for a single-message call to the Messages API.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    api_version: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: Option<String>,
        api_version: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
            api_version: api_version.into(),
            model: model.into(),
            max_tokens,
            timeout,
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        bounded(self.timeout, async {
            let mut builder = self
                .client
                .post(&self.api_url)
                .header("anthropic-version", &self.api_version)
                .json(&request);
            if let Some(key) = &self.api_key {
                builder = builder.header("x-api-key", key);
            }

            let response = builder.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GenerationError::status(status.as_u16(), &body));
            }

            let body: Value = response.json().await?;
            let text = extract_text(&body).ok_or(GenerationError::Empty)?;

            tracing::debug!(model = %self.model, chars = text.len(), "Generation completed");
            Ok(text.to_string())
        })
        .await
    }
}

/// The generated text at `content[0].text`, if present and non-empty.
pub fn extract_text(body: &Value) -> Option<&str> {
    body.get("content")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    fn client_for(server: &Server, api_key: Option<&str>) -> AnthropicClient {
        AnthropicClient::new(
            reqwest::Client::new(),
            format!("{}/v1/messages", server.url()),
            api_key.map(str::to_string),
            "2023-06-01",
            "claude-test",
            1024,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_extract_text() {
        let body = json!({ "content": [{ "type": "text", "text": "ser..." }] });
        assert_eq!(extract_text(&body), Some("ser..."));
        assert_eq!(extract_text(&json!({ "content": [] })), None);
        assert_eq!(extract_text(&json!({ "content": [{ "text": "" }] })), None);
        assert_eq!(extract_text(&json!({})), None);
    }

    #[tokio::test]
    async fn test_generate_sends_single_message() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("anthropic-version", "2023-06-01")
            .match_header("x-api-key", "sk-test")
            .match_body(Matcher::Json(json!({
                "model": "claude-test",
                "max_tokens": 1024,
                "messages": [{ "role": "user", "content": "roast me" }],
            })))
            .with_header("content-type", "application/json")
            .with_body(json!({ "content": [{ "type": "text", "text": "VERDICT: NGMI" }] }).to_string())
            .create_async()
            .await;

        let text = client_for(&server, Some("sk-test"))
            .generate("roast me")
            .await
            .unwrap();

        assert_eq!(text, "VERDICT: NGMI");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_non_success_status() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_body("o".repeat(450))
            .create_async()
            .await;

        let err = client_for(&server, None).generate("roast me").await.unwrap_err();

        match err {
            GenerationError::Status { status, body } => {
                assert_eq!(status, 529);
                assert_eq!(body.len(), 200);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_without_text_is_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_header("content-type", "application/json")
            .with_body(json!({ "content": [] }).to_string())
            .create_async()
            .await;

        let err = client_for(&server, None).generate("roast me").await.unwrap_err();

        assert!(matches!(err, GenerationError::Empty));
    }
}
