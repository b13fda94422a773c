use crate::config::schema::RuntimeConfig;
use crate::error::{OllamaError, Result};
use crate::ollama::types::{ChatRequest, ChatResponse, CreateRequest, TagsResponse};
use reqwest::StatusCode;
use std::time::Duration;

/// HTTP client for the local Ollama control API
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("client", &"Client { ... }")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OllamaClient {
    /// Create new client from runtime config
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.host.trim_end_matches('/').to_string(),
        })
    }

    /// List the names of models installed in the runtime's registry
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api(format!("tags failed ({status}): {error_body}")).into());
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Malformed(format!("Failed to parse tags response: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Create a model in the registry from Modelfile content
    pub async fn create_model(&self, name: &str, modelfile: &str) -> Result<()> {
        let url = format!("{}/api/create", self.base_url);
        let request = CreateRequest {
            model: name.to_string(),
            modelfile: modelfile.to_string(),
            stream: false,
        };

        tracing::info!("Registering model '{name}' with Ollama");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api(format!("create failed ({status}): {error_body}")).into());
        }

        Ok(())
    }

    /// Submit a single user message and return the full response
    pub async fn chat(&self, model: &str, content: &str) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest::user(model, content);

        tracing::debug!("Submitting chat request to model '{model}'");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        let status = response.status();

        match status {
            StatusCode::OK => {
                let parsed: ChatResponse = response.json().await.map_err(|e| {
                    OllamaError::Malformed(format!("Failed to parse chat response: {e}"))
                })?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(OllamaError::ModelMissing.into()),
            _ => {
                let error_body = response.text().await.unwrap_or_default();
                Err(OllamaError::Api(format!("chat failed ({status}): {error_body}")).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = RuntimeConfig {
            host: "http://localhost:11434/".to_string(),
            timeout_secs: 30,
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_new_with_defaults() {
        let client = OllamaClient::new(&RuntimeConfig::default());
        assert!(client.is_ok());
    }
}
