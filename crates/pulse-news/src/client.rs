//! Chat-completion HTTP client.

use async_trait::async_trait;
use pulse_core::error::{NewsError, PulseError};
use pulse_core::traits::{Completion, CompletionRequest, CompletionSource};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Chat-completion endpoint configuration.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    /// API root, `/chat/completions` is appended
    pub base_url: String,
    /// Bearer token; requests fail until one is set
    pub api_key: Option<String>,
    /// Environment variable the key is read from, for error messages
    pub api_key_env: String,
    pub timeout: Duration,
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.perplexity.ai".to_string(),
            api_key: None,
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// `null` and a missing key both read as empty.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
    #[serde(default)]
    citations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-style `chat/completions` API with citations.
pub struct ChatCompletionClient {
    config: ChatClientConfig,
    client: Client,
}

impl ChatCompletionClient {
    /// Create a new client.
    pub fn new(config: ChatClientConfig) -> Result<Self, PulseError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PulseError::Config(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[async_trait]
impl CompletionSource for ChatCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, NewsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| NewsError::MissingApiKey {
                env_var: self.config.api_key_env.clone(),
            })?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| NewsError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NewsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| NewsError::Decode(e.to_string()))?;

        let citations = parsed.citations.unwrap_or_default();
        let content = parsed
            .choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "[]".to_string());

        debug!(
            model = %request.model,
            chars = content.len(),
            citations = citations.len(),
            "Completion received"
        );

        Ok(Completion { content, citations })
    }

    fn name(&self) -> &str {
        "chat-completions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use pulse_core::traits::ChatMessage;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "sonar-pro".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("usr")],
            search_recency_filter: Some("day".to_string()),
            temperature: 0.5,
            max_tokens: 3000,
        }
    }

    fn client_for(server: &MockServer, api_key: Option<&str>) -> ChatCompletionClient {
        ChatCompletionClient::new(ChatClientConfig {
            base_url: server.base_url(),
            api_key: api_key.map(str::to_string),
            ..ChatClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_reads_content_and_citations() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body(json!({
                    "model": "sonar-pro",
                    "messages": [
                        {"role": "system", "content": "sys"},
                        {"role": "user", "content": "usr"}
                    ],
                    "search_recency_filter": "day",
                    "temperature": 0.5,
                    "max_tokens": 3000
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "[{\"headline\":\"A [1]\"}]"}}],
                    "citations": ["https://a.example"]
                }));
        });

        let completion = client_for(&server, Some("test-key"))
            .complete(&request())
            .await
            .unwrap();
        mock.assert();

        assert_eq!(completion.content, r#"[{"headline":"A [1]"}]"#);
        assert_eq!(completion.citations, vec!["https://a.example".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_content_defaults_to_empty_array() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"choices": []}));
        });

        let completion = client_for(&server, Some("k")).complete(&request()).await.unwrap();
        assert_eq!(completion.content, "[]");
        assert!(completion.citations.is_empty());
    }

    #[tokio::test]
    async fn test_null_citations_and_choices_read_as_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions").body_includes("first");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "choices": [{"message": {"content": "[{\"headline\":\"A\"}]"}}],
                    "citations": null
                }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions").body_includes("second");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"choices": null, "citations": null}));
        });
        let client = client_for(&server, Some("k"));

        let mut first = request();
        first.messages[1] = ChatMessage::user("first");
        let completion = client.complete(&first).await.unwrap();
        assert_eq!(completion.content, r#"[{"headline":"A"}]"#);
        assert!(completion.citations.is_empty());

        let mut second = request();
        second.messages[1] = ChatMessage::user("second");
        let completion = client.complete(&second).await.unwrap();
        assert_eq!(completion.content, "[]");
        assert!(completion.citations.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).body("invalid api key");
        });

        let err = client_for(&server, Some("bad")).complete(&request()).await.unwrap_err();
        match err {
            NewsError::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200);
        });

        let err = client_for(&server, None).complete(&request()).await.unwrap_err();
        assert!(matches!(err, NewsError::MissingApiKey { ref env_var } if env_var == "PERPLEXITY_API_KEY"));
        mock.assert_hits(0);
    }
}
