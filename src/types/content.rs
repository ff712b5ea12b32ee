//! Content part types

use serde::{Deserialize, Serialize};

/// File payload: raw bytes, or a string holding base64 data or a `data:` URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileData {
    Text(String),
    Binary(Vec<u8>),
}

/// Tool-call arguments: a JSON-encoded string or a structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolCallInput {
    Text(String),
    Json(serde_json::Value),
}

/// Content part - provider-agnostic message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },

    /// File content (only raster images are accepted by the Messages API)
    File {
        data: FileData,
        #[serde(rename = "mediaType")]
        media_type: String,
    },

    /// Tool invocation requested by the assistant
    ToolCall {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        input: ToolCallInput,
    },

    /// Output of a tool invocation
    ToolResult {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        output: serde_json::Value,
        #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn file_bytes(data: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self::File {
            data: FileData::Binary(data.into()),
            media_type: media_type.into(),
        }
    }

    /// File from base64 text or a `data:` URI.
    pub fn file_data(data: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self::File {
            data: FileData::Text(data.into()),
            media_type: media_type.into(),
        }
    }

    pub fn tool_call(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        input: serde_json::Value,
    ) -> Self {
        Self::ToolCall {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            input: ToolCallInput::Json(input),
        }
    }

    pub fn tool_result(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: serde_json::Value,
    ) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            output,
            is_error: None,
        }
    }

    /// Failed tool result (`is_error` set).
    pub fn tool_error(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: serde_json::Value,
    ) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            output,
            is_error: Some(true),
        }
    }

    /// Wire tag of this part.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::File { .. } => "file",
            Self::ToolCall { .. } => "tool-call",
            Self::ToolResult { .. } => "tool-result",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}
