//! OpenAI chat-completions translator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    TranslateError,
    Translator,
};
use crate::config::TranslatorConfig;

/// Translator backed by an OpenAI compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiTranslator {
    /// API base URL without a trailing slash.
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl std::fmt::Debug for OpenAiTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiTranslator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Request body of a chat completion.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

/// The part of a chat completion response we read.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiTranslator {
    /// # Errors
    /// Returns [`TranslateError::MissingApiKey`] for a blank key and
    /// [`TranslateError::Client`] when the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        config: &TranslatorConfig,
    ) -> Result<Self, TranslateError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TranslateError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| TranslateError::Client(err.to_string()))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request(&self, prompt: String) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        }
    }
}

/// Instruction sent for one message.
fn prompt(message: &str, source_locale: &str, target_locale: &str) -> String {
    format!("Translate {message} from {source_locale} to {target_locale}")
}

/// Text of the first choice, trimmed.
fn reply_text(response: ChatResponse) -> Result<String, TranslateError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(TranslateError::EmptyResponse)
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        message: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<String, TranslateError> {
        let body = self.request(prompt(message, source_locale, target_locale));
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Status { status: status.as_u16(), body });
        }

        reply_text(response.json::<ChatResponse>().await?)
    }
}
