use async_trait::async_trait;
use kb_core::{CompletionModel, CompletionRequest, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use crate::{Config, DEFAULT_BASE_URL, DEFAULT_MODEL_NAME};

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Chat-completion model speaking the OpenAI wire format.
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl OpenAiModel {
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("OpenAI API key is required (set OPENAI_API_KEY)".to_string()))?;
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: config
                .model_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model_name: config.model_name.unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl CompletionModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatRequest {
            model: &self.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .json::<ChatResponse>()
            .await?;

        // Rate limits and rejected keys come back as an error payload without
        // choices; that is an empty reply, which the classifier answers as a miss.
        if let Some(error) = response.error {
            warn!("{} returned an error: {}", self.model_name, error.message);
            return Ok(String::new());
        }

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default();
        debug!("{} replied: {:?}", self.model_name, content);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model_for(server: &MockServer) -> OpenAiModel {
        OpenAiModel::new(Config {
            api_key: Some("test-key".to_string()),
            model_name: None,
            model_url: Some(format!("{}/v1/", server.uri())),
        })
        .unwrap()
    }

    #[test]
    fn test_model_requires_api_key() {
        let result = OpenAiModel::new(Config::default());
        assert!(matches!(result, Err(Error::Config(_))));

        let result = OpenAiModel::new(Config {
            api_key: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());

        let model = OpenAiModel::new(Config {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(model.model_name(), DEFAULT_MODEL_NAME);
        assert!(!format!("{:?}", model).contains("test-key"));
    }

    #[tokio::test]
    async fn test_complete_sends_chat_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "temperature": 0.0,
                "messages": [
                    {"role": "system", "content": "be strict"},
                    {"role": "user", "content": "Input: \"how?\""}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": " 3\n"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = model_for(&server)
            .complete(&CompletionRequest::new("be strict", "Input: \"how?\""))
            .await
            .unwrap();
        assert_eq!(reply, " 3\n");
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let reply = model_for(&server)
            .complete(&CompletionRequest::new("s", "p"))
            .await
            .unwrap();
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn test_complete_api_error_is_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "requests"}
            })))
            .mount(&server)
            .await;

        let reply = model_for(&server)
            .complete(&CompletionRequest::new("s", "p"))
            .await
            .unwrap();
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn test_complete_undecodable_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
            .mount(&server)
            .await;

        let result = model_for(&server)
            .complete(&CompletionRequest::new("s", "p"))
            .await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
