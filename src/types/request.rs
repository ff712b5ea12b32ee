//! Call options

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::message::ChatMessage;
use super::tools::{FunctionTool, ToolChoice};

/// Per-call generation options.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub prompt: Vec<ChatMessage>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
    pub tools: Option<Vec<FunctionTool>>,
    pub tool_choice: Option<ToolChoice>,
    /// Not supported by the Messages API; reported as a warning.
    pub presence_penalty: Option<f32>,
    /// Not supported by the Messages API; reported as a warning.
    pub frequency_penalty: Option<f32>,
    /// Not supported by the Messages API; reported as a warning.
    pub seed: Option<u64>,
    /// Cancels the in-flight request or stream when triggered.
    pub abort_signal: Option<CancellationToken>,
}

impl CallOptions {
    pub fn new(prompt: Vec<ChatMessage>) -> Self {
        Self {
            prompt,
            ..Default::default()
        }
    }

    pub const fn max_output_tokens(mut self, max_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_tokens);
        self
    }

    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub const fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub const fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn stop_sequences(mut self, stop: Vec<String>) -> Self {
        self.stop_sequences = Some(stop);
        self
    }

    pub fn tools(mut self, tools: Vec<FunctionTool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    pub const fn presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub const fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn abort_signal(mut self, token: CancellationToken) -> Self {
        self.abort_signal = Some(token);
        self
    }
}

/// Non-fatal notice about an option the provider ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CallWarning {
    UnsupportedSetting {
        setting: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl CallWarning {
    pub fn unsupported_setting(setting: impl Into<String>) -> Self {
        Self::UnsupportedSetting {
            setting: setting.into(),
            details: None,
        }
    }
}
