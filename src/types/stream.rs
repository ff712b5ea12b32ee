//! Unified stream parts

use futures::Stream;
use serde::{Serialize, Serializer};
use std::pin::Pin;

use super::request::CallWarning;
use super::response::{FinishReason, Usage};
use crate::error::LlmError;

/// One incremental unit of unified streaming output.
///
/// `TextStart` / `TextDelta` / `TextEnd` triples correlate through `id`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamPart {
    StreamStart {
        warnings: Vec<CallWarning>,
    },
    TextStart {
        id: String,
    },
    TextDelta {
        id: String,
        delta: String,
    },
    TextEnd {
        id: String,
    },
    /// A fully assembled tool call; `input` is the JSON argument text.
    ToolCall {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        input: String,
    },
    Finish {
        #[serde(rename = "finishReason")]
        finish_reason: FinishReason,
        usage: Usage,
    },
    Error {
        #[serde(serialize_with = "serialize_error")]
        error: LlmError,
    },
}

fn serialize_error<S: Serializer>(error: &LlmError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

/// Boxed stream of unified parts.
pub type ChatStream = Pin<Box<dyn Stream<Item = StreamPart> + Send>>;
