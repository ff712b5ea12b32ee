//! Language model behaviour over a recording `MessagesClient`.

use std::sync::{Arc, Mutex};

use anthropic_bridge::prelude::*;
use anthropic_bridge::provider::CreateMessageOutput;
use anthropic_bridge::standards::anthropic::types::{
    AnthropicResponse, AnthropicResponseContent, AnthropicStreamEvent, AnthropicUsage,
    ContentBlockDelta, MessagesRequestBody, StreamContentBlock,
};
use async_trait::async_trait;
use futures_util::StreamExt;
use serde_json::json;
use tokio_util::sync::CancellationToken;

enum Canned {
    Message(AnthropicResponse),
    Events(Vec<AnthropicStreamEvent>),
}

struct RecordingClient {
    canned: Canned,
    bodies: Mutex<Vec<MessagesRequestBody>>,
    signals: Mutex<Vec<bool>>,
}

impl RecordingClient {
    fn new(canned: Canned) -> Arc<Self> {
        Arc::new(Self {
            canned,
            bodies: Mutex::new(Vec::new()),
            signals: Mutex::new(Vec::new()),
        })
    }

    fn last_body(&self) -> MessagesRequestBody {
        self.bodies.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl MessagesClient for RecordingClient {
    async fn create_message(
        &self,
        body: &MessagesRequestBody,
        abort_signal: Option<CancellationToken>,
    ) -> Result<CreateMessageOutput, LlmError> {
        self.bodies.lock().unwrap().push(body.clone());
        self.signals.lock().unwrap().push(abort_signal.is_some());

        Ok(match &self.canned {
            Canned::Message(response) => CreateMessageOutput::Message(response.clone()),
            Canned::Events(events) => {
                let items: Vec<Result<AnthropicStreamEvent, LlmError>> =
                    events.iter().cloned().map(Ok).collect();
                CreateMessageOutput::Stream(Box::pin(futures_util::stream::iter(items)))
            }
        })
    }
}

fn tool_use_response() -> AnthropicResponse {
    AnthropicResponse {
        id: "msg_42".to_string(),
        model: "claude-3-5-sonnet-20241022".to_string(),
        content: vec![
            AnthropicResponseContent::Text {
                text: "Let me check.".to_string(),
            },
            AnthropicResponseContent::ToolUse {
                id: "toolu_9".to_string(),
                name: "get_weather".to_string(),
                input: json!({"city": "Berlin"}),
            },
        ],
        stop_reason: Some("tool_use".to_string()),
        usage: AnthropicUsage {
            input_tokens: 20,
            output_tokens: 8,
            cache_read_input_tokens: None,
            cache_creation_input_tokens: Some(5),
        },
    }
}

fn weather_tool() -> FunctionTool {
    FunctionTool::new(
        "get_weather",
        json!({"type": "object", "properties": {"city": {"type": "string"}}}),
    )
    .with_description("Current weather")
}

#[tokio::test]
async fn generate_renders_options_and_maps_tool_calls() {
    let client = RecordingClient::new(Canned::Message(tool_use_response()));
    let model = AnthropicMessagesModel::new("claude-3-5-sonnet-20241022", client.clone()).unwrap();

    let options = CallOptions::new(vec![ChatMessage::user("Weather in Berlin?")])
        .max_output_tokens(512)
        .temperature(0.2)
        .top_k(40)
        .stop_sequences(vec!["END".to_string()])
        .tools(vec![weather_tool()])
        .tool_choice(ToolChoice::Required)
        .seed(7)
        .abort_signal(CancellationToken::new());

    let result = model.do_generate(options).await.unwrap();

    let body = client.last_body();
    assert_eq!(body.model, "claude-3-5-sonnet-20241022");
    assert_eq!(body.max_tokens, 512);
    assert_eq!(body.top_k, Some(40));
    assert!(!body.is_stream());
    assert_eq!(client.signals.lock().unwrap().as_slice(), &[true]);

    let rendered = serde_json::to_value(&body).unwrap();
    assert_eq!(rendered["tool_choice"], json!({"type": "any"}));
    assert_eq!(rendered["tools"][0]["name"], "get_weather");
    assert_eq!(rendered["tools"][0]["description"], "Current weather");
    assert_eq!(rendered["stop_sequences"], json!(["END"]));
    assert_eq!(result.request.body, rendered);

    assert_eq!(
        result.warnings,
        vec![CallWarning::unsupported_setting("seed")]
    );
    assert_eq!(result.finish_reason.unified, UnifiedFinishReason::ToolCalls);
    assert_eq!(result.usage.input_tokens.cache_write, Some(5));
    assert_eq!(
        result.response.model_id.as_deref(),
        Some("claude-3-5-sonnet-20241022")
    );

    assert_eq!(result.content.len(), 2);
    assert_eq!(result.content[0], ContentPart::text("Let me check."));
    match &result.content[1] {
        ContentPart::ToolCall {
            tool_call_id,
            tool_name,
            input,
        } => {
            assert_eq!(tool_call_id, "toolu_9");
            assert_eq!(tool_name, "get_weather");
            let ToolCallInput::Text(text) = input else {
                panic!("expected serialized tool input");
            };
            assert_eq!(
                serde_json::from_str::<serde_json::Value>(text).unwrap(),
                json!({"city": "Berlin"})
            );
        }
        other => panic!("expected tool call, got {other:?}"),
    }
}

#[tokio::test]
async fn tool_choice_is_dropped_without_tools() {
    let client = RecordingClient::new(Canned::Message(tool_use_response()));
    let model = AnthropicMessagesModel::new("claude", client.clone()).unwrap();

    model
        .do_generate(
            CallOptions::new(vec![ChatMessage::user("Hi")])
                .tools(Vec::new())
                .tool_choice(ToolChoice::tool("get_weather")),
        )
        .await
        .unwrap();

    let rendered = serde_json::to_value(client.last_body()).unwrap();
    assert!(rendered.get("tools").is_none());
    assert!(rendered.get("tool_choice").is_none());
    assert_eq!(client.signals.lock().unwrap().as_slice(), &[false]);
}

#[tokio::test]
async fn tool_round_trip_conversation_is_rendered_in_order() {
    let client = RecordingClient::new(Canned::Message(tool_use_response()));
    let model = AnthropicMessagesModel::new("claude", client.clone()).unwrap();

    let prompt = vec![
        ChatMessage::system("You are a weather bot."),
        ChatMessage::user("Weather in Berlin?"),
        ChatMessage::assistant(vec![ContentPart::ToolCall {
            tool_call_id: "toolu_9".to_string(),
            tool_name: "get_weather".to_string(),
            input: ToolCallInput::Text(r#"{"city":"Berlin"}"#.to_string()),
        }]),
        ChatMessage::tool(vec![ContentPart::tool_result(
            "toolu_9",
            "get_weather",
            json!({"temp": 18}),
        )]),
        ChatMessage::user("Thanks!"),
    ];
    model.do_generate(CallOptions::new(prompt)).await.unwrap();

    let rendered = serde_json::to_value(client.last_body()).unwrap();
    assert_eq!(rendered["system"], "You are a weather bot.");
    assert_eq!(
        rendered["messages"],
        json!([
            {"role": "user", "content": "Weather in Berlin?"},
            {"role": "assistant", "content": [
                {"type": "tool_use", "id": "toolu_9", "name": "get_weather", "input": {"city": "Berlin"}}
            ]},
            {"role": "user", "content": [
                {"type": "tool_result", "tool_use_id": "toolu_9", "content": "{\"temp\":18}"},
                {"type": "text", "text": "Thanks!"}
            ]}
        ])
    );
}

#[tokio::test]
async fn stream_yields_parts_with_penalty_warnings() {
    let events = vec![
        AnthropicStreamEvent::ContentBlockStart {
            index: 0,
            content_block: StreamContentBlock::Text {
                text: String::new(),
            },
        },
        AnthropicStreamEvent::ContentBlockDelta {
            index: 0,
            delta: ContentBlockDelta::TextDelta {
                text: "Hi there".to_string(),
            },
        },
        AnthropicStreamEvent::ContentBlockStop { index: 0 },
        AnthropicStreamEvent::MessageStop,
    ];
    let client = RecordingClient::new(Canned::Events(events));
    let model = AnthropicMessagesModel::new("claude", client.clone()).unwrap();

    let result = model
        .do_stream(
            CallOptions::new(vec![ChatMessage::user("Hello")])
                .presence_penalty(0.5)
                .frequency_penalty(0.1),
        )
        .await
        .unwrap();
    assert!(client.last_body().is_stream());

    let parts: Vec<StreamPart> = result.stream.collect().await;
    assert_eq!(parts.len(), 5);

    match &parts[0] {
        StreamPart::StreamStart { warnings } => assert_eq!(
            warnings,
            &vec![
                CallWarning::unsupported_setting("presencePenalty"),
                CallWarning::unsupported_setting("frequencyPenalty"),
            ]
        ),
        other => panic!("expected stream start, got {other:?}"),
    }
    assert!(matches!(&parts[1], StreamPart::TextStart { id } if id == "text-0"));
    assert!(matches!(&parts[2], StreamPart::TextDelta { delta, .. } if delta == "Hi there"));
    assert!(matches!(&parts[3], StreamPart::TextEnd { id } if id == "text-0"));
    match &parts[4] {
        StreamPart::Finish { finish_reason, .. } => {
            assert_eq!(finish_reason.unified, UnifiedFinishReason::Other);
            assert_eq!(finish_reason.raw.as_deref(), Some("other"));
        }
        other => panic!("expected finish, got {other:?}"),
    }
}

#[tokio::test]
async fn mismatched_client_output_is_reported() {
    let client = RecordingClient::new(Canned::Events(Vec::new()));
    let model = AnthropicMessagesModel::new("claude", client).unwrap();

    let err = model
        .do_generate(CallOptions::new(vec![ChatMessage::user("Hi")]))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::StreamError(_)));
}
