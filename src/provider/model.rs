//! Anthropic Messages language model
//!
//! Renders [`CallOptions`] through the request transformer, hands the body to
//! a [`MessagesClient`] and converts what comes back into unified results.

use std::sync::Arc;

use crate::error::LlmError;
use crate::standards::anthropic::{
    AnthropicRequestTransformer, AnthropicResponseTransformer, process_stream,
};
use crate::types::{CallOptions, ChatStream, GenerateResult, RequestMetadata};

use super::client::{CreateMessageOutput, MessagesClient};
use super::config::AnthropicConfig;
use super::transport::HttpMessagesClient;

/// Result of [`AnthropicMessagesModel::do_stream`].
pub struct StreamResult {
    pub stream: ChatStream,
    pub request: RequestMetadata,
}

impl std::fmt::Debug for StreamResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResult")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AnthropicMessagesModel {
    model_id: String,
    client: Arc<dyn MessagesClient>,
    request_transformer: AnthropicRequestTransformer,
    response_transformer: AnthropicResponseTransformer,
}

impl std::fmt::Debug for AnthropicMessagesModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicMessagesModel")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

impl AnthropicMessagesModel {
    pub const PROVIDER: &'static str = "anthropic.messages";

    pub fn new(
        model_id: impl Into<String>,
        client: Arc<dyn MessagesClient>,
    ) -> Result<Self, LlmError> {
        let model_id = model_id.into();
        if model_id.trim().is_empty() {
            return Err(LlmError::ValidationError(
                "model id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            request_transformer: AnthropicRequestTransformer::new(model_id.clone()),
            response_transformer: AnthropicResponseTransformer,
            model_id,
            client,
        })
    }

    /// Model talking to the Messages API over HTTP.
    pub fn from_config(
        model_id: impl Into<String>,
        config: AnthropicConfig,
    ) -> Result<Self, LlmError> {
        Self::new(model_id, Arc::new(HttpMessagesClient::new(config)))
    }

    pub fn provider(&self) -> &'static str {
        Self::PROVIDER
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Non-streaming generation.
    pub async fn do_generate(&self, options: CallOptions) -> Result<GenerateResult, LlmError> {
        let (body, warnings) = self.request_transformer.transform_chat(&options, false)?;
        let request_body = serde_json::to_value(&body)?;

        let output = self
            .client
            .create_message(&body, options.abort_signal.clone())
            .await?;

        match output {
            CreateMessageOutput::Message(response) => {
                tracing::debug!(
                    id = %response.id,
                    stop_reason = ?response.stop_reason,
                    "Anthropic message received"
                );
                Ok(self
                    .response_transformer
                    .transform_response(&response, warnings, request_body))
            }
            CreateMessageOutput::Stream(_) => Err(LlmError::StreamError(
                "expected a message response, got an event stream".to_string(),
            )),
        }
    }

    /// Streaming generation. Parts are produced lazily as events arrive.
    pub async fn do_stream(&self, options: CallOptions) -> Result<StreamResult, LlmError> {
        let (body, warnings) = self.request_transformer.transform_chat(&options, true)?;
        let request_body = serde_json::to_value(&body)?;

        let output = self
            .client
            .create_message(&body, options.abort_signal.clone())
            .await?;

        match output {
            CreateMessageOutput::Stream(events) => Ok(StreamResult {
                stream: Box::pin(process_stream(events, warnings)),
                request: RequestMetadata { body: request_body },
            }),
            CreateMessageOutput::Message(_) => Err(LlmError::StreamError(
                "expected an event stream, got a message response".to_string(),
            )),
        }
    }
}
