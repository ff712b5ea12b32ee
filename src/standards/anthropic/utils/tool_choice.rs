use super::*;

/// Map a unified tool choice onto the Messages API.
///
/// The API has no "none" choice; `ToolChoice::None` falls back to `auto`,
/// which still lets the model call a tool.
pub fn convert_tool_choice(choice: &ToolChoice) -> AnthropicToolChoice {
    match choice {
        ToolChoice::Auto | ToolChoice::None => AnthropicToolChoice::Auto,
        ToolChoice::Required => AnthropicToolChoice::Any,
        ToolChoice::Tool { tool_name } => AnthropicToolChoice::Tool {
            name: tool_name.clone(),
        },
    }
}
