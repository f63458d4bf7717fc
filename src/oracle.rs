//! The chat-completion capability the predictor depends on.
//!
//! The handler only sees `ChatOracle`, so tests can swap the HTTP gateway for
//! canned replies.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::error::PredictError;
use crate::prompt::{ChatMessage, Prompt, TEMPERATURE};

#[async_trait]
pub trait ChatOracle: Send + Sync {
    /// Sends the prompt and returns the raw text of the model's reply.
    async fn complete(&self, prompt: &Prompt) -> Result<String, PredictError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// HTTP client for an OpenAI-style `/chat/completions` gateway.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl GatewayClient {
    pub fn new(url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.gateway_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
        )
    }
}

#[async_trait]
impl ChatOracle for GatewayClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, PredictError> {
        // Checked per request so the server can start without a credential.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PredictError::MissingCredential)?;

        let request = CompletionRequest {
            model: &self.model,
            messages: prompt.messages(),
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, url = %self.url, "sending completion request");
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => PredictError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => PredictError::QuotaExhausted,
                _ => {
                    let body = response.text().await.unwrap_or_default();
                    error!(status = status.as_u16(), %body, "AI gateway error");
                    PredictError::Gateway {
                        status: status.as_u16(),
                        body,
                    }
                }
            });
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "AI gateway returned an unreadable envelope");
            PredictError::MalformedResponse
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                error!("AI gateway returned no choices");
                PredictError::MalformedResponse
            })
    }
}
