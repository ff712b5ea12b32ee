//! Error Handling Module
//!
//! A single error type, `LlmError`, is shared by the converters, the stream
//! processor and the client collaborator. Variants are grouped by
//! [`ErrorCategory`] so callers can branch on the kind of failure without
//! matching every variant.
//!
//! # Example
//!
//! ```rust,ignore
//! use anthropic_bridge::error::{ErrorCategory, LlmError};
//!
//! let error = LlmError::unsupported_media_type("image/bmp");
//! assert_eq!(error.category(), ErrorCategory::Conversion);
//! assert_eq!(error.field(), Some("mediaType"));
//! ```

mod conversions;
pub mod types;

pub use types::*;
