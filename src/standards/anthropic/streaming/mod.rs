//! Anthropic streaming conversion
//!
//! Turns the Messages API event stream into unified [`StreamPart`]s. All
//! per-stream bookkeeping lives in one owned [`StreamState`] that the
//! generator threads through the events, one event at a time.

use std::collections::{HashMap, HashSet};

use futures::{Stream, StreamExt};

use super::types::{AnthropicStreamEvent, ContentBlockDelta, StreamContentBlock};
use super::utils::{DEFAULT_RAW_FINISH_REASON, map_stop_reason};
use crate::error::LlmError;
use crate::types::{
    CallWarning, FinishReason, InputTokens, OutputTokens, StreamPart, Usage,
};

/// Tool-call arguments collected for one content block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ToolCallAccumulator {
    id: String,
    name: String,
    arguments: String,
}

/// Id correlating the text parts of the block at `index`.
fn text_block_id(index: usize) -> String {
    format!("text-{index}")
}

/// Accumulation state for a single stream.
#[derive(Debug, Default)]
pub struct StreamState {
    warnings: Vec<CallWarning>,
    stream_started: bool,
    tool_calls: HashMap<usize, ToolCallAccumulator>,
    open_text_blocks: HashSet<usize>,
    input_tokens: u64,
    output_tokens: u64,
    stop_reason: Option<String>,
}

impl StreamState {
    /// `warnings` are reported once, in the `StreamStart` part.
    pub fn new(warnings: Vec<CallWarning>) -> Self {
        Self {
            warnings,
            ..Default::default()
        }
    }

    /// Apply one vendor event and return the parts it produces, in order.
    pub fn process_event(&mut self, event: AnthropicStreamEvent) -> Vec<StreamPart> {
        let mut parts = Vec::new();

        if !self.stream_started {
            self.stream_started = true;
            parts.push(StreamPart::StreamStart {
                warnings: std::mem::take(&mut self.warnings),
            });
        }

        match event {
            AnthropicStreamEvent::MessageStart { message } => {
                if let Some(input_tokens) = message.usage.and_then(|u| u.input_tokens) {
                    self.input_tokens = input_tokens;
                }
            }
            AnthropicStreamEvent::ContentBlockStart {
                index,
                content_block,
            } => match content_block {
                StreamContentBlock::Text { .. } => {
                    self.open_text_blocks.insert(index);
                    parts.push(StreamPart::TextStart {
                        id: text_block_id(index),
                    });
                }
                StreamContentBlock::ToolUse {
                    id: Some(id),
                    name: Some(name),
                } => {
                    self.tool_calls.insert(
                        index,
                        ToolCallAccumulator {
                            id,
                            name,
                            arguments: String::new(),
                        },
                    );
                }
                StreamContentBlock::ToolUse { .. } | StreamContentBlock::Other => {}
            },
            AnthropicStreamEvent::ContentBlockDelta { index, delta } => match delta {
                ContentBlockDelta::TextDelta { text } => {
                    if self.open_text_blocks.insert(index) {
                        parts.push(StreamPart::TextStart {
                            id: text_block_id(index),
                        });
                    }
                    parts.push(StreamPart::TextDelta {
                        id: text_block_id(index),
                        delta: text,
                    });
                }
                ContentBlockDelta::InputJsonDelta { partial_json } => {
                    match self.tool_calls.get_mut(&index) {
                        Some(call) => call.arguments.push_str(&partial_json),
                        None => tracing::trace!("Dropping input_json_delta for unknown block {index}"),
                    }
                }
                ContentBlockDelta::Other => {}
            },
            AnthropicStreamEvent::ContentBlockStop { index } => {
                if self.open_text_blocks.remove(&index) {
                    parts.push(StreamPart::TextEnd {
                        id: text_block_id(index),
                    });
                }
                if let Some(call) = self.tool_calls.remove(&index) {
                    let input = if call.arguments.is_empty() {
                        "{}".to_string()
                    } else {
                        call.arguments
                    };
                    parts.push(StreamPart::ToolCall {
                        tool_call_id: call.id,
                        tool_name: call.name,
                        input,
                    });
                }
            }
            AnthropicStreamEvent::MessageDelta { delta, usage } => {
                if let Some(output_tokens) = usage.and_then(|u| u.output_tokens) {
                    self.output_tokens = output_tokens;
                }
                if let Some(reason) = delta.stop_reason {
                    self.stop_reason = Some(reason);
                }
            }
            AnthropicStreamEvent::Error { error } => {
                tracing::warn!(
                    "Ignoring in-band Anthropic error event ({}): {}",
                    error.error_type,
                    error.message
                );
            }
            AnthropicStreamEvent::MessageStop
            | AnthropicStreamEvent::Ping
            | AnthropicStreamEvent::Unknown => {}
        }

        parts
    }

    /// Terminal part for a stream that completed normally.
    pub fn finish(self) -> StreamPart {
        let raw = self
            .stop_reason
            .unwrap_or_else(|| DEFAULT_RAW_FINISH_REASON.to_string());

        StreamPart::Finish {
            finish_reason: FinishReason {
                unified: map_stop_reason(Some(&raw)),
                raw: Some(raw),
            },
            usage: Usage {
                input_tokens: InputTokens {
                    total: Some(self.input_tokens),
                    ..Default::default()
                },
                output_tokens: OutputTokens {
                    total: Some(self.output_tokens),
                    text: Some(self.output_tokens),
                    reasoning: None,
                },
            },
        }
    }
}

/// Convert a Messages API event stream into unified stream parts.
///
/// The output is lazy: one vendor event is pulled per demand. A normal end
/// yields a final `Finish`; a source error yields one `Error` part instead
/// and ends the stream.
pub fn process_stream<S>(events: S, warnings: Vec<CallWarning>) -> impl Stream<Item = StreamPart>
where
    S: Stream<Item = Result<AnthropicStreamEvent, LlmError>>,
{
    async_stream::stream! {
        let mut state = StreamState::new(warnings);
        let mut events = Box::pin(events);

        while let Some(item) = events.next().await {
            match item {
                Ok(event) => {
                    for part in state.process_event(event) {
                        yield part;
                    }
                }
                Err(error) => {
                    tracing::debug!("Anthropic event stream failed: {error}");
                    yield StreamPart::Error { error };
                    return;
                }
            }
        }

        yield state.finish();
    }
}
