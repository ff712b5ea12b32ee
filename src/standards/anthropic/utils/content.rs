use super::*;
use base64::Engine;

/// Image media types the Messages API accepts.
pub const SUPPORTED_IMAGE_MEDIA_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Convert one unified content part of a `role` message into a request block.
///
/// Tool results are only valid inside tool messages and go through
/// [`convert_tool_result`] instead.
pub fn convert_content_part(
    part: &ContentPart,
    role: MessageRole,
) -> Result<AnthropicContentBlock, LlmError> {
    match part {
        ContentPart::Text { text } => Ok(AnthropicContentBlock::text(text.clone())),
        ContentPart::File { data, media_type } => {
            if role != MessageRole::User {
                return Err(LlmError::unsupported_content_part(
                    part.type_name(),
                    role.as_str(),
                ));
            }
            if !SUPPORTED_IMAGE_MEDIA_TYPES.contains(&media_type.as_str()) {
                return Err(LlmError::unsupported_media_type(media_type.clone()));
            }
            Ok(AnthropicContentBlock::Image {
                source: ImageSource::base64(media_type.clone(), encode_file_data(data)),
            })
        }
        ContentPart::ToolCall {
            tool_call_id,
            tool_name,
            input,
        } => {
            if role != MessageRole::Assistant {
                return Err(LlmError::unsupported_content_part(
                    part.type_name(),
                    role.as_str(),
                ));
            }
            Ok(AnthropicContentBlock::ToolUse {
                id: tool_call_id.clone(),
                name: tool_name.clone(),
                input: parse_tool_input(input),
            })
        }
        ContentPart::ToolResult { .. } => Err(LlmError::unsupported_content_part(
            part.type_name(),
            role.as_str(),
        )),
    }
}

/// Convert a part of a tool message. Anything but a tool result is rejected.
pub fn convert_tool_result(part: &ContentPart) -> Result<AnthropicContentBlock, LlmError> {
    match part {
        ContentPart::ToolResult {
            tool_call_id,
            output,
            is_error,
            ..
        } => {
            let content = match output {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok(AnthropicContentBlock::ToolResult {
                tool_use_id: tool_call_id.clone(),
                content,
                is_error: *is_error,
            })
        }
        other => Err(LlmError::unsupported_content_part(
            other.type_name(),
            MessageRole::Tool.as_str(),
        )),
    }
}

/// Best-effort argument parsing: a string that is not valid JSON becomes `{}`.
pub fn parse_tool_input(input: &ToolCallInput) -> serde_json::Value {
    match input {
        ToolCallInput::Json(value) => value.clone(),
        ToolCallInput::Text(text) => serde_json::from_str(text).unwrap_or_else(|err| {
            tracing::debug!("Tool call arguments are not valid JSON ({err}); sending {{}}");
            serde_json::json!({})
        }),
    }
}

/// Base64 payload for an image block.
///
/// Bytes are encoded; a `data:` URI loses everything up to and including the
/// first comma; any other string is assumed to be base64 already.
fn encode_file_data(data: &FileData) -> String {
    match data {
        FileData::Binary(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
        FileData::Text(text) => {
            if text.starts_with("data:")
                && let Some((_, payload)) = text.split_once(',')
            {
                payload.to_string()
            } else {
                text.clone()
            }
        }
    }
}

/// Convert a response block into a unified part. Unmapped block types yield `None`.
pub fn convert_response_block(block: &AnthropicResponseContent) -> Option<ContentPart> {
    match block {
        AnthropicResponseContent::Text { text } => Some(ContentPart::text(text.clone())),
        AnthropicResponseContent::ToolUse { id, name, input } => Some(ContentPart::ToolCall {
            tool_call_id: id.clone(),
            tool_name: name.clone(),
            input: ToolCallInput::Text(input.to_string()),
        }),
        AnthropicResponseContent::Unsupported => {
            tracing::debug!("Skipping unsupported Anthropic response content block");
            None
        }
    }
}

#[cfg(test)]
mod image_block_tests {
    use super::*;

    fn image_source(block: AnthropicContentBlock) -> ImageSource {
        match block {
            AnthropicContentBlock::Image { source } => source,
            other => panic!("expected image block, got {other:?}"),
        }
    }

    #[test]
    fn raw_bytes_are_base64_encoded() {
        let part = ContentPart::file_bytes(vec![72, 101, 108, 108, 111], "image/png");
        let source = image_source(convert_content_part(&part, MessageRole::User).unwrap());
        assert_eq!(source.source_type, "base64");
        assert_eq!(source.media_type, "image/png");
        assert_eq!(source.data, "SGVsbG8=");
    }

    #[test]
    fn data_uri_prefix_is_stripped() {
        let part = ContentPart::file_data("data:image/jpeg;base64,/9j/4AAQ", "image/jpeg");
        let source = image_source(convert_content_part(&part, MessageRole::User).unwrap());
        assert_eq!(source.media_type, "image/jpeg");
        assert_eq!(source.data, "/9j/4AAQ");
    }

    #[test]
    fn plain_strings_pass_through_as_base64() {
        let part = ContentPart::file_data("R0lGODlh", "image/gif");
        let source = image_source(convert_content_part(&part, MessageRole::User).unwrap());
        assert_eq!(source.data, "R0lGODlh");
    }

    #[test]
    fn unsupported_media_type_is_rejected() {
        let part = ContentPart::file_bytes(vec![0u8; 4], "image/bmp");
        let err = convert_content_part(&part, MessageRole::User).unwrap_err();
        match &err {
            LlmError::UnsupportedMediaType { field, media_type } => {
                assert_eq!(field, "mediaType");
                assert_eq!(media_type, "image/bmp");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn files_are_only_allowed_in_user_messages() {
        let part = ContentPart::file_bytes(vec![1, 2, 3], "image/png");
        let err = convert_content_part(&part, MessageRole::Assistant).unwrap_err();
        assert!(matches!(
            err,
            LlmError::UnsupportedContentPart { ref part_type, ref role }
                if part_type == "file" && role == "assistant"
        ));
    }
}
