//! Tool definition and tool choice types

use serde::{Deserialize, Serialize};

/// Function tool the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "function")]
pub struct FunctionTool {
    /// Function name
    pub name: String,
    /// Function description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema for function parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl FunctionTool {
    pub fn new(name: impl Into<String>, input_schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Provider-agnostic tool choice strategy
///
/// # Anthropic mapping
///
/// - `Auto` → `{"type": "auto"}`
/// - `None` → `{"type": "auto"}`: the Messages API has no "none" choice, so
///   the model may still decide to call a tool.
/// - `Required` → `{"type": "any"}`
/// - `Tool { tool_name }` → `{"type": "tool", "name": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide whether to call tools (default)
    #[default]
    Auto,
    /// Ask the model not to call tools
    None,
    /// Require the model to call at least one tool
    Required,
    /// Force a specific tool
    Tool {
        #[serde(rename = "toolName")]
        tool_name: String,
    },
}

impl ToolChoice {
    pub fn tool(name: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: name.into(),
        }
    }
}
