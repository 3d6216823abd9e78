/// LLM Client — the single point of entry for all completion-service calls in Wingmate.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All model interactions MUST go through this module.
///
/// The client is stateless between calls and safe to retry; the service itself
/// is nondeterministic, so a retry may return different text.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_RETRIES: u32 = 3;

/// Which model tier a call needs. Photo analysis requires vision; the
/// conversation coach runs on the cheaper text model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Text,
    Vision,
}

impl ModelKind {
    pub fn id(&self) -> &'static str {
        match self {
            ModelKind::Text => "claude-3-5-haiku-20241022",
            ModelKind::Vision => "claude-sonnet-4-5",
        }
    }
}

/// Generation parameters with defaults so callers rarely spell them out.
#[derive(Debug, Clone, Copy)]
pub struct GenParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

/// An image handed to a vision call, in the order the user submitted it.
/// Browser uploads arrive already base64-encoded; stored photos come as URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Base64 { media_type: String, data: String },
    Url { url: String },
}

/// One round trip to the completion service.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub system: &'a str,
    pub images: &'a [ImageRef],
    pub model: ModelKind,
    pub params: GenParams,
}

impl<'a> CompletionRequest<'a> {
    pub fn text(prompt: &'a str, system: &'a str) -> Self {
        Self {
            prompt,
            system,
            images: &[],
            model: ModelKind::Text,
            params: GenParams::default(),
        }
    }

    pub fn vision(prompt: &'a str, system: &'a str, images: &'a [ImageRef]) -> Self {
        Self {
            prompt,
            system,
            images,
            model: ModelKind::Vision,
            params: GenParams::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Provider rejected credentials (status {status}): {message}")]
    ProviderAuth { status: u16, message: String },

    #[error("Malformed request (status {status}): {message}")]
    InvalidRequest { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Anthropic Messages API)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ImageSource<'a> {
    Base64 {
        media_type: &'a str,
        data: &'a str,
    },
    Url {
        url: &'a str,
    },
}

#[derive(Debug, Deserialize)]
struct LlmResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl LlmResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The one operation pipelines need from the client. A trait seam so tests
/// can script replies without the network.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError>;
}

#[async_trait]
impl Invoker for LlmClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
        LlmClient::complete(self, request).await
    }
}

/// The single LLM client used by both pipelines. Wraps the Anthropic Messages
/// API with retry logic and a bounded per-call wait.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    timeout_secs: u64,
}

impl LlmClient {
    pub fn new(api_key: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            timeout_secs,
        }
    }

    /// Performs one completion round trip and returns the raw reply text.
    /// The reply may or may not be the JSON the prompt asked for — recovering
    /// structure from it is the extractor's job, not this module's.
    ///
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
        // Images precede the instruction text, in submission order.
        let mut content: Vec<ContentPart<'_>> = request
            .images
            .iter()
            .map(|image| ContentPart::Image {
                source: match image {
                    ImageRef::Base64 { media_type, data } => ImageSource::Base64 {
                        media_type,
                        data,
                    },
                    ImageRef::Url { url } => ImageSource::Url { url },
                },
            })
            .collect();
        content.push(ContentPart::Text {
            text: request.prompt,
        });

        let request_body = AnthropicRequest {
            model: request.model.id(),
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
            system: request.system,
            messages: vec![AnthropicMessage {
                role: "user",
                content,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) if e.is_timeout() => {
                    last_error = Some(LlmError::Timeout {
                        secs: self.timeout_secs,
                    });
                    continue;
                }
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                let status = status.as_u16();
                // Non-retryable rejections, each surfaced as its own kind.
                return Err(match status {
                    401 | 403 => LlmError::ProviderAuth { status, message },
                    400 | 413 | 422 => LlmError::InvalidRequest { status, message },
                    _ => LlmError::Api { status, message },
                });
            }

            let llm_response: LlmResponse =
                response.json().await.map_err(LlmError::Http)?;

            debug!(
                "LLM call succeeded: model={}, input_tokens={}, output_tokens={}",
                request.model.id(),
                llm_response.usage.input_tokens,
                llm_response.usage.output_tokens
            );

            return match llm_response.text() {
                Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
                _ => Err(LlmError::EmptyContent),
            };
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}
