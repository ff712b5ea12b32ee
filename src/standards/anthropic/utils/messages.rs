use super::*;

/// Prompt in Messages API form: extracted system text plus the turn list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedPrompt {
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
}

/// Convert a unified conversation into the Messages API shape.
///
/// - System messages are pulled out of the turn list; the last one wins.
/// - Tool messages become `user` turns holding `tool_result` blocks.
/// - A single text block collapses to a bare string.
/// - Adjacent turns with the same role are merged in order.
pub fn convert_messages(messages: &[ChatMessage]) -> Result<ConvertedPrompt, LlmError> {
    let mut system = None;
    let mut converted = Vec::with_capacity(messages.len());

    for message in messages {
        match message.role {
            MessageRole::System => {
                system = Some(flatten_system_text(&message.content));
            }
            MessageRole::User | MessageRole::Assistant => {
                let role = if message.role == MessageRole::User {
                    AnthropicRole::User
                } else {
                    AnthropicRole::Assistant
                };
                converted.push(AnthropicMessage {
                    role,
                    content: convert_message_content(&message.content, message.role)?,
                });
            }
            MessageRole::Tool => {
                let content = match &message.content {
                    MessageContent::Text(text) => AnthropicContent::Text(text.clone()),
                    MessageContent::MultiModal(parts) => AnthropicContent::Blocks(
                        parts
                            .iter()
                            .map(convert_tool_result)
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                };
                converted.push(AnthropicMessage {
                    role: AnthropicRole::User,
                    content,
                });
            }
        }
    }

    Ok(ConvertedPrompt {
        system,
        messages: merge_adjacent_roles(converted),
    })
}

fn flatten_system_text(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::MultiModal(parts) => parts
            .iter()
            .filter_map(ContentPart::as_text)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn convert_message_content(
    content: &MessageContent,
    role: MessageRole,
) -> Result<AnthropicContent, LlmError> {
    match content {
        MessageContent::Text(text) => Ok(AnthropicContent::Text(text.clone())),
        MessageContent::MultiModal(parts) => {
            let blocks = parts
                .iter()
                .map(|part| convert_content_part(part, role))
                .collect::<Result<Vec<_>, _>>()?;

            if let [AnthropicContentBlock::Text { text }] = blocks.as_slice() {
                return Ok(AnthropicContent::Text(text.clone()));
            }
            Ok(AnthropicContent::Blocks(blocks))
        }
    }
}

fn merge_adjacent_roles(messages: Vec<AnthropicMessage>) -> Vec<AnthropicMessage> {
    let mut merged: Vec<AnthropicMessage> = Vec::with_capacity(messages.len());

    for message in messages {
        match merged.last_mut() {
            Some(last) if last.role == message.role => {
                let previous =
                    std::mem::replace(&mut last.content, AnthropicContent::Blocks(Vec::new()));
                let mut blocks = previous.into_blocks();
                blocks.extend(message.content.into_blocks());
                last.content = AnthropicContent::Blocks(blocks);
            }
            _ => merged.push(message),
        }
    }

    merged
}


#[cfg(test)]
mod conversation_tests {
    use super::*;

    #[test]
    fn single_text_part_collapses_to_string() {
        let prompt =
            convert_messages(&[ChatMessage::user(vec![ContentPart::text("hello")])]).unwrap();
        assert_eq!(
            prompt.messages[0].content,
            AnthropicContent::Text("hello".to_string())
        );
    }

    #[test]
    fn multi_part_content_keeps_one_block_per_part() {
        let prompt = convert_messages(&[ChatMessage::user(vec![
            ContentPart::text("look"),
            ContentPart::file_bytes(vec![1, 2], "image/webp"),
        ])])
        .unwrap();
        match &prompt.messages[0].content {
            AnthropicContent::Blocks(blocks) => assert_eq!(blocks.len(), 2),
            other => panic!("expected blocks, got {other:?}"),
        }
    }

    #[test]
    fn single_non_text_part_is_not_collapsed() {
        let prompt = convert_messages(&[ChatMessage::assistant(vec![ContentPart::tool_call(
            "call_1",
            "f",
            serde_json::json!({}),
        )])])
        .unwrap();
        assert!(matches!(
            prompt.messages[0].content,
            AnthropicContent::Blocks(ref blocks) if blocks.len() == 1
        ));
    }

    #[test]
    fn tool_messages_become_user_turns() {
        let prompt = convert_messages(&[
            ChatMessage::assistant(vec![ContentPart::tool_call(
                "call_1",
                "get_weather",
                serde_json::json!({"location": "NYC"}),
            )]),
            ChatMessage::tool(vec![ContentPart::tool_result(
                "call_1",
                "get_weather",
                serde_json::json!({"temp": 72}),
            )]),
        ])
        .unwrap();

        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[1].role, AnthropicRole::User);
        let json = serde_json::to_value(&prompt.messages[1]).unwrap();
        assert_eq!(json["content"][0]["type"], "tool_result");
        assert_eq!(json["content"][0]["tool_use_id"], "call_1");
        assert_eq!(json["content"][0]["content"], r#"{"temp":72}"#);
    }

    #[test]
    fn tool_message_with_string_content_degrades_to_user_text() {
        let prompt = convert_messages(&[ChatMessage::new(MessageRole::Tool, "raw output")]).unwrap();
        assert_eq!(prompt.messages[0].role, AnthropicRole::User);
        assert_eq!(
            prompt.messages[0].content,
            AnthropicContent::Text("raw output".to_string())
        );
    }

    #[test]
    fn tool_message_rejects_non_result_parts() {
        let err = convert_messages(&[ChatMessage::tool(vec![ContentPart::text("oops")])])
            .unwrap_err();
        assert!(matches!(
            err,
            LlmError::UnsupportedContentPart { ref part_type, ref role }
                if part_type == "text" && role == "tool"
        ));
    }

    #[test]
    fn adjacent_same_role_messages_are_merged_in_order() {
        let prompt = convert_messages(&[
            ChatMessage::user("first"),
            ChatMessage::user(vec![ContentPart::text("second"), ContentPart::text("third")]),
            ChatMessage::tool(vec![ContentPart::tool_result(
                "call_1",
                "f",
                serde_json::json!("done"),
            )]),
            ChatMessage::assistant("reply"),
        ])
        .unwrap();

        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(
            prompt.messages[0].content,
            AnthropicContent::Blocks(vec![
                AnthropicContentBlock::text("first"),
                AnthropicContentBlock::text("second"),
                AnthropicContentBlock::text("third"),
                AnthropicContentBlock::ToolResult {
                    tool_use_id: "call_1".to_string(),
                    content: "done".to_string(),
                    is_error: None,
                },
            ])
        );
        assert_eq!(
            prompt.messages[1].content,
            AnthropicContent::Text("reply".to_string())
        );
    }

    #[test]
    fn system_messages_between_turns_do_not_block_merging() {
        let prompt = convert_messages(&[
            ChatMessage::user("a"),
            ChatMessage::system("sys"),
            ChatMessage::user("b"),
        ])
        .unwrap();
        assert_eq!(prompt.messages.len(), 1);
        assert_eq!(
            prompt.messages[0].content,
            AnthropicContent::Blocks(vec![
                AnthropicContentBlock::text("a"),
                AnthropicContentBlock::text("b"),
            ])
        );
    }

    #[test]
    fn conversion_errors_propagate() {
        let err = convert_messages(&[ChatMessage::user(vec![ContentPart::file_bytes(
            vec![0],
            "image/bmp",
        )])])
        .unwrap_err();
        assert_eq!(err.field(), Some("mediaType"));
    }
}
