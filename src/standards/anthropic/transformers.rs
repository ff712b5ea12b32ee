//! Transformers for the Anthropic Messages API
//!
//! Centralizes request rendering and response mapping so the language model
//! façade only deals with transport.

use crate::error::LlmError;
use crate::types::{CallOptions, CallWarning, GenerateResult, RequestMetadata, ResponseMetadata};

use super::types::{AnthropicResponse, MessagesRequestBody};
use super::utils::{
    convert_messages, convert_tool_choice, convert_tools_to_anthropic_format,
    create_usage_from_response, map_finish_reason, parse_response_content,
};

/// `max_tokens` is mandatory on the wire; used when the caller sets none.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Request transformer for Anthropic
#[derive(Debug, Clone)]
pub struct AnthropicRequestTransformer {
    model: String,
}

impl AnthropicRequestTransformer {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Render call options into a request body.
    ///
    /// Optional body fields are only set when the matching option was
    /// supplied. Options the API has no equivalent for become warnings.
    pub fn transform_chat(
        &self,
        options: &CallOptions,
        stream: bool,
    ) -> Result<(MessagesRequestBody, Vec<CallWarning>), LlmError> {
        let prompt = convert_messages(&options.prompt)?;

        let mut warnings = Vec::new();
        if options.presence_penalty.is_some() {
            warnings.push(CallWarning::unsupported_setting("presencePenalty"));
        }
        if options.frequency_penalty.is_some() {
            warnings.push(CallWarning::unsupported_setting("frequencyPenalty"));
        }
        if options.seed.is_some() {
            warnings.push(CallWarning::unsupported_setting("seed"));
        }

        let tools = options
            .tools
            .as_deref()
            .filter(|tools| !tools.is_empty())
            .map(convert_tools_to_anthropic_format);
        let tool_choice = if tools.is_some() {
            options.tool_choice.as_ref().map(convert_tool_choice)
        } else {
            None
        };

        let body = MessagesRequestBody {
            model: self.model.clone(),
            max_tokens: options.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: prompt.messages,
            system: prompt.system,
            stream: stream.then_some(true),
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            stop_sequences: options.stop_sequences.clone(),
            tools,
            tool_choice,
        };

        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            stream,
            "Rendered Anthropic messages request"
        );

        Ok((body, warnings))
    }
}

/// Response transformer for Anthropic
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicResponseTransformer;

impl AnthropicResponseTransformer {
    pub fn transform_response(
        &self,
        response: &AnthropicResponse,
        warnings: Vec<CallWarning>,
        request_body: serde_json::Value,
    ) -> GenerateResult {
        GenerateResult {
            content: parse_response_content(response),
            finish_reason: map_finish_reason(response.stop_reason.as_deref()),
            usage: create_usage_from_response(&response.usage),
            warnings,
            request: RequestMetadata { body: request_body },
            response: ResponseMetadata {
                id: Some(response.id.clone()),
                model_id: Some(response.model.clone()),
            },
        }
    }
}
