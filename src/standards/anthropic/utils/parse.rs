use super::*;

/// Unified content of a non-streaming response, in block order.
pub fn parse_response_content(response: &AnthropicResponse) -> Vec<ContentPart> {
    response
        .content
        .iter()
        .filter_map(convert_response_block)
        .collect()
}

/// Usage of a non-streaming response. Only counts the API reported are set.
pub fn create_usage_from_response(usage: &AnthropicUsage) -> Usage {
    Usage {
        input_tokens: InputTokens {
            total: Some(usage.input_tokens),
            no_cache: None,
            cache_read: usage.cache_read_input_tokens,
            cache_write: usage.cache_creation_input_tokens,
        },
        output_tokens: OutputTokens {
            total: Some(usage.output_tokens),
            text: None,
            reasoning: None,
        },
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn response(json: serde_json::Value) -> AnthropicResponse {
        serde_json::from_value(json).expect("valid response")
    }

    #[test]
    fn content_blocks_keep_order_and_skip_unknown_types() {
        let resp = response(serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-haiku-20241022",
            "content": [
                {"type": "text", "text": "Let me check."},
                {"type": "thinking", "thinking": "...", "signature": "sig"},
                {"type": "tool_use", "id": "toolu_1", "name": "get_weather", "input": {"location": "NYC"}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 12, "output_tokens": 30}
        }));

        let parts = parse_response_content(&resp);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], ContentPart::text("Let me check."));
        assert_eq!(
            parts[1],
            ContentPart::ToolCall {
                tool_call_id: "toolu_1".to_string(),
                tool_name: "get_weather".to_string(),
                input: ToolCallInput::Text(r#"{"location":"NYC"}"#.to_string()),
            }
        );
    }

    #[test]
    fn usage_passes_through_cache_counts_without_inventing_others() {
        let usage = AnthropicUsage {
            input_tokens: 100,
            output_tokens: 20,
            cache_read_input_tokens: Some(80),
            cache_creation_input_tokens: None,
        };
        let mapped = create_usage_from_response(&usage);
        assert_eq!(mapped.input_tokens.total, Some(100));
        assert_eq!(mapped.input_tokens.cache_read, Some(80));
        assert_eq!(mapped.input_tokens.cache_write, None);
        assert_eq!(mapped.input_tokens.no_cache, None);
        assert_eq!(mapped.output_tokens.total, Some(20));
        assert_eq!(mapped.output_tokens.text, None);
        assert_eq!(mapped.output_tokens.reasoning, None);
    }
}
