//! anthropic-bridge
//!
//! Adapter between a provider-neutral language-model protocol and the
//! Anthropic Messages API.
//!
//! - [`standards::anthropic`] converts unified prompts into request bodies and
//!   maps responses, stop reasons and streaming events back.
//! - [`provider`] holds the configuration, the [`provider::MessagesClient`]
//!   seam, its HTTP implementation and the [`provider::AnthropicMessagesModel`].
//!
//! ```rust,no_run
//! use anthropic_bridge::prelude::*;
//!
//! # async fn run() -> Result<(), LlmError> {
//! let config = AnthropicConfig::builder()
//!     .base_url("https://api.anthropic.com/v1")
//!     .api_key("sk-ant-...")
//!     .build()?;
//! let model = AnthropicMessagesModel::from_config("claude-3-5-haiku-20241022", config)?;
//!
//! let result = model
//!     .do_generate(CallOptions::new(vec![ChatMessage::user("Hello!")]).max_output_tokens(256))
//!     .await?;
//! println!("{}", result.text());
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod error;
pub mod provider;
pub mod standards;
pub mod types;

pub use error::{ErrorCategory, LlmError};

/// Commonly used types.
pub mod prelude {
    pub use crate::error::{ErrorCategory, LlmError};
    pub use crate::provider::{
        AnthropicConfig, AnthropicMessagesModel, HttpMessagesClient, MessagesClient, StreamResult,
    };
    pub use crate::types::*;
}
