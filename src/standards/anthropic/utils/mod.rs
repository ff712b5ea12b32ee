//! Anthropic Utility Functions
//!
//! Conversion helpers between the unified types and the Messages API wire types.

use super::types::*;
use crate::error::LlmError;
use crate::types::*;

mod content;
mod errors;
mod finish;
mod messages;
mod parse;
mod tool_choice;
mod tools;

pub use content::{
    SUPPORTED_IMAGE_MEDIA_TYPES, convert_content_part, convert_response_block,
    convert_tool_result, parse_tool_input,
};
pub use errors::{default_status_for_error_type, map_anthropic_error};
pub use finish::{DEFAULT_RAW_FINISH_REASON, map_finish_reason, map_stop_reason};
pub use messages::{ConvertedPrompt, convert_messages};
pub use parse::{create_usage_from_response, parse_response_content};
pub use tool_choice::convert_tool_choice;
pub use tools::convert_tools_to_anthropic_format;
