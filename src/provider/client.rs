//! Client seam for the Messages API.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

use crate::error::LlmError;
use crate::standards::anthropic::types::{
    AnthropicResponse, AnthropicStreamEvent, MessagesRequestBody,
};

/// Vendor events as produced by a client.
pub type AnthropicEventStream =
    Pin<Box<dyn Stream<Item = Result<AnthropicStreamEvent, LlmError>> + Send>>;

/// Outcome of "create message": a full response, or an event stream when the
/// request body asked for streaming.
pub enum CreateMessageOutput {
    Message(AnthropicResponse),
    Stream(AnthropicEventStream),
}

impl std::fmt::Debug for CreateMessageOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(response) => f.debug_tuple("Message").field(response).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Anything able to execute a Messages API call.
///
/// Implementations own transport, authentication and cancellation; the
/// language model only renders bodies and converts results.
#[async_trait]
pub trait MessagesClient: Send + Sync {
    async fn create_message(
        &self,
        body: &MessagesRequestBody,
        abort_signal: Option<CancellationToken>,
    ) -> Result<CreateMessageOutput, LlmError>;
}
