use super::*;

/// Convert function tools to Messages API tool definitions.
pub fn convert_tools_to_anthropic_format(tools: &[FunctionTool]) -> Vec<AnthropicTool> {
    tools
        .iter()
        .map(|tool| AnthropicTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: tool.input_schema.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tools_tests {
    use super::*;

    #[test]
    fn renames_input_schema_and_keeps_optional_description() {
        let tools = vec![
            FunctionTool::new(
                "get_weather",
                serde_json::json!({"type": "object", "properties": {"location": {"type": "string"}}}),
            )
            .with_description("Get the weather"),
            FunctionTool::new("noop", serde_json::json!({"type": "object"})),
        ];

        let converted = serde_json::to_value(convert_tools_to_anthropic_format(&tools)).unwrap();
        assert_eq!(converted[0]["name"], "get_weather");
        assert_eq!(converted[0]["description"], "Get the weather");
        assert_eq!(
            converted[0]["input_schema"]["properties"]["location"]["type"],
            "string"
        );
        assert!(converted[1].get("description").is_none());
        assert!(converted[1].get("inputSchema").is_none());
    }
}
