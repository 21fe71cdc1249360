use anyhow::{anyhow, Context, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use super::{CompletionParams, Message, MessageRole, Provider, ProviderFuture};

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
const DEFAULT_MODEL: &str = "deepseek-chat";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
const RATE_LIMIT_MAX_RETRIES: usize = 4;
const RATE_LIMIT_BASE_DELAY: Duration = Duration::from_secs(2);
const RATE_LIMIT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Chat-completions client for the DeepSeek API (or any compatible server
/// reachable through `DEEPSEEK_BASE_URL`).
#[derive(Debug, Clone)]
pub struct DeepSeek {
    key: String,
    model: String,
    messages: Vec<Message>,
}

impl DeepSeek {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            model: DEFAULT_MODEL.to_string(),
            messages: Vec::new(),
        }
    }

    /// Builds a client from process configuration. A missing key is not an
    /// error here: `complete` reports it, so callers can degrade per request
    /// instead of refusing to start.
    pub fn from_env() -> Self {
        let key = std::env::var("DEEPSEEK_API_KEY").unwrap_or_default();
        let model = std::env::var("DEEPSEEK_MODEL").unwrap_or_default();
        Self::new(key).with_model(model)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = model;
        }
        self
    }
}

impl Provider for DeepSeek {
    fn append_system_input(mut self, input: String) -> Self {
        self.messages.push(Message::system(input));
        self
    }

    fn append_user_input(mut self, input: String) -> Self {
        self.messages.push(Message::user(input));
        self
    }

    fn complete(self, params: CompletionParams) -> ProviderFuture {
        Box::pin(async move { call_chat_completions(self, params).await })
    }
}

fn base_url() -> String {
    std::env::var("DEEPSEEK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

async fn call_chat_completions(provider: DeepSeek, params: CompletionParams) -> Result<String> {
    if provider.key.trim().is_empty() {
        return Err(anyhow!("DEEPSEEK_API_KEY is not set"));
    }

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .with_context(|| "failed to build HTTP client")?;
    let url = format!("{}/chat/completions", base_url());

    let messages = provider
        .messages
        .iter()
        .map(|message| {
            let role = match message.role {
                MessageRole::System => "system",
                MessageRole::User => "user",
            };
            json!({"role": role, "content": message.content})
        })
        .collect::<Vec<_>>();

    let body = json!({
        "model": provider.model,
        "messages": messages,
        "temperature": params.temperature,
        "max_tokens": params.max_output_tokens,
    });

    let mut attempt = 0usize;
    let mut delay = RATE_LIMIT_BASE_DELAY;
    loop {
        attempt += 1;
        let response = client
            .post(&url)
            .bearer_auth(provider.key.clone())
            .json(&body)
            .send()
            .await
            .with_context(|| "model request failed")?;

        let status = response.status();
        let retry_after = retry_after(response.headers());
        let text = response.text().await.unwrap_or_default();
        if status.is_success() {
            return extract_content(&text);
        }
        if is_rate_limited(status, &text) && attempt < RATE_LIMIT_MAX_RETRIES {
            delay = wait_with_backoff(attempt, delay, retry_after).await;
            continue;
        }
        return Err(anyhow!(
            "model API error ({}): {}",
            status,
            extract_api_error(&text).unwrap_or(text)
        ));
    }
}

fn extract_content(text: &str) -> Result<String> {
    let payload: ChatResponse =
        serde_json::from_str(text).with_context(|| "failed to parse model response JSON")?;
    let content = payload
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .unwrap_or_default()
        .to_string();
    if content.trim().is_empty() {
        return Err(anyhow!("model reply contained no text content"));
    }
    Ok(content)
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

fn extract_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<ApiError>,
    }

    #[derive(Deserialize)]
    struct ApiError {
        message: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let error = parsed.error?;
    let mut parts = Vec::new();
    if let Some(message) = error.message {
        if !message.trim().is_empty() {
            parts.push(message);
        }
    }
    if let Some(kind) = error.kind {
        if !kind.trim().is_empty() {
            parts.push(format!("type: {}", kind));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

fn is_rate_limited(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    let code = status.as_u16();
    if code == 529 || code == 503 {
        return true;
    }
    let lower = body.to_lowercase();
    lower.contains("rate limit")
        || lower.contains("rate_limit")
        || lower.contains("too many requests")
        || lower.contains("quota")
        || lower.contains("overloaded")
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get("retry-after")?.to_str().ok()?.trim();
    let secs = value.parse::<u64>().ok()?;
    Some(Duration::from_secs(secs))
}

async fn wait_with_backoff(
    attempt: usize,
    delay: Duration,
    retry_after: Option<Duration>,
) -> Duration {
    let mut wait = delay;
    if let Some(retry_after) = retry_after
        && retry_after > wait
    {
        wait = retry_after;
    }
    warn!(
        "model API rate limited; retrying in {:.1}s (attempt {}/{})",
        wait.as_secs_f32(),
        attempt,
        RATE_LIMIT_MAX_RETRIES
    );
    sleep(wait).await;
    let next = Duration::from_secs(delay.as_secs().saturating_mul(2).max(1));
    if next > RATE_LIMIT_MAX_DELAY {
        RATE_LIMIT_MAX_DELAY
    } else {
        next
    }
}
