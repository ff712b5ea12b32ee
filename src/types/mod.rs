//! Unified (provider-agnostic) types
//!
//! The message, content, option and result shapes the model-abstraction
//! layer speaks. Provider wire types live under [`crate::standards`].

pub mod content;
pub mod message;
pub mod request;
pub mod response;
pub mod stream;
pub mod tools;

pub use content::{ContentPart, FileData, ToolCallInput};
pub use message::{ChatMessage, MessageContent, MessageRole};
pub use request::{CallOptions, CallWarning};
pub use response::{
    FinishReason, GenerateResult, InputTokens, OutputTokens, RequestMetadata, ResponseMetadata,
    UnifiedFinishReason, Usage,
};
pub use stream::{ChatStream, StreamPart};
pub use tools::{FunctionTool, ToolChoice};
