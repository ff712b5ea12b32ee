//! Anthropic provider
//!
//! Configuration, the "create message" client seam with its HTTP
//! implementation, and the language model that ties the converters to it.

pub mod client;
pub mod config;
pub mod model;
pub mod transport;

pub use client::{AnthropicEventStream, CreateMessageOutput, MessagesClient};
pub use config::{AnthropicConfig, AnthropicConfigBuilder};
pub use model::{AnthropicMessagesModel, StreamResult};
pub use transport::HttpMessagesClient;
