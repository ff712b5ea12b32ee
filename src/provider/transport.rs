//! HTTP transport for the Messages API
//!
//! `POST {base_url}/messages` with JSON or server-sent events, depending on
//! the `stream` flag of the rendered body.

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::client::{AnthropicEventStream, CreateMessageOutput, MessagesClient};
use super::config::{ANTHROPIC_VERSION, AnthropicConfig};
use crate::error::LlmError;
use crate::standards::anthropic::types::{
    AnthropicErrorEnvelope, AnthropicResponse, AnthropicStreamEvent, MessagesRequestBody,
};
use crate::standards::anthropic::utils::{default_status_for_error_type, map_anthropic_error};

/// [`MessagesClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpMessagesClient {
    config: AnthropicConfig,
    http: reqwest::Client,
}

impl HttpMessagesClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Reuse an existing `reqwest::Client` (connection pool, proxies, timeouts).
    pub fn with_http_client(config: AnthropicConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    fn build_headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        let mut api_key = HeaderValue::from_str(self.config.api_key.expose_secret())
            .map_err(|e| LlmError::ValidationError(format!("invalid API key header: {e}")))?;
        api_key.set_sensitive(true);
        headers.insert("x-api-key", api_key);

        for (name, value) in &self.config.headers {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }

    async fn send(&self, body: &MessagesRequestBody) -> Result<reqwest::Response, LlmError> {
        let url = self.config.messages_url();
        tracing::debug!(%url, model = %body.model, stream = body.is_stream(), "Sending Anthropic messages request");

        let response = self
            .http
            .post(&url)
            .headers(self.build_headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Anthropic messages request failed");
        Err(error_from_body(status.as_u16(), &text))
    }
}

/// Map a non-2xx response body to an error, keeping the raw payload as details.
fn error_from_body(status: u16, text: &str) -> LlmError {
    let details = serde_json::from_str::<Value>(text).ok();
    if let Some(value) = &details
        && let Ok(envelope) = serde_json::from_value::<AnthropicErrorEnvelope>(value.clone())
    {
        return map_anthropic_error(status, &envelope.error, value.clone());
    }

    LlmError::ApiError {
        code: status,
        message: if text.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            text.trim().to_string()
        },
        details,
    }
}

/// Decode one SSE `data:` payload into a vendor event.
///
/// In-band `error` events become `Err` so that consumers see a failed stream.
fn decode_event(data: &str) -> Result<AnthropicStreamEvent, LlmError> {
    let value: Value = serde_json::from_str(data)
        .map_err(|e| LlmError::JsonError(format!("Failed to parse Anthropic SSE event: {e}")))?;
    let event: AnthropicStreamEvent = serde_json::from_value(value.clone())
        .map_err(|e| LlmError::JsonError(format!("Failed to parse Anthropic SSE event: {e}")))?;

    match event {
        AnthropicStreamEvent::Error { error } => Err(map_anthropic_error(
            default_status_for_error_type(&error.error_type),
            &error,
            value,
        )),
        other => Ok(other),
    }
}

/// Turn a byte stream of server-sent events into vendor events.
///
/// The stream ends after the first error, or with [`LlmError::Cancelled`]
/// once `cancel` fires.
pub fn decode_event_stream<S, B, E>(bytes: S, cancel: CancellationToken) -> AnthropicEventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let out = async_stream::stream! {
        let mut events = Box::pin(bytes.eventsource());

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    yield Err(LlmError::Cancelled);
                    return;
                }
                next = events.next() => next,
            };

            let Some(item) = next else { break };
            let event = match item {
                Ok(event) => event,
                Err(e) => {
                    yield Err(LlmError::StreamError(format!("SSE stream error: {e}")));
                    return;
                }
            };

            let data = event.data.trim();
            if data.is_empty() {
                continue;
            }

            match decode_event(data) {
                Ok(event) => yield Ok(event),
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    };

    Box::pin(out)
}

#[async_trait]
impl MessagesClient for HttpMessagesClient {
    async fn create_message(
        &self,
        body: &MessagesRequestBody,
        abort_signal: Option<CancellationToken>,
    ) -> Result<CreateMessageOutput, LlmError> {
        let cancel = abort_signal.unwrap_or_default();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LlmError::Cancelled),
            response = self.send(body) => response?,
        };

        if body.is_stream() {
            let bytes = response.bytes_stream();
            return Ok(CreateMessageOutput::Stream(decode_event_stream(bytes, cancel)));
        }

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LlmError::Cancelled),
            text = response.text() => text?,
        };
        let message: AnthropicResponse = serde_json::from_str(&text)?;
        Ok(CreateMessageOutput::Message(message))
    }
}
