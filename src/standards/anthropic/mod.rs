//! Anthropic Messages API Standard
//!
//! Request rendering, response parsing and streaming-event conversion for
//! the Anthropic Messages API format.

pub mod streaming;
pub mod transformers;
pub mod types;
pub mod utils;

pub use streaming::{StreamState, process_stream};
pub use transformers::{AnthropicRequestTransformer, AnthropicResponseTransformer};
pub use utils::{ConvertedPrompt, convert_messages, map_stop_reason};
