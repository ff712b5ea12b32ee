//! Provider protocol standards
//!
//! Wire-format mappings between the unified types and provider APIs.

pub mod anthropic;
