//! Provider configuration

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::error::LlmError;

/// Messages API version sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Validated provider configuration.
#[derive(Debug, Clone, Validate)]
pub struct AnthropicConfig {
    /// Endpoint prefix; requests go to `{base_url}/messages`.
    #[validate(url)]
    pub base_url: String,
    pub api_key: SecretString,
    /// Extra headers sent with every request.
    pub headers: HeaderMap,
}

impl AnthropicConfig {
    pub fn builder() -> AnthropicConfigBuilder {
        AnthropicConfigBuilder::default()
    }

    pub fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }
}

/// Builder for [`AnthropicConfig`]. `build` fails fast on missing or invalid
/// settings.
#[derive(Debug, Clone, Default)]
pub struct AnthropicConfigBuilder {
    base_url: Option<String>,
    api_key: Option<SecretString>,
    headers: HashMap<String, String>,
}

impl AnthropicConfigBuilder {
    /// Set the base URL
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Add a custom header
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add several custom headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn build(self) -> Result<AnthropicConfig, LlmError> {
        let base_url = self
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| LlmError::ValidationError("base URL is required".to_string()))?;

        let api_key = self
            .api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| LlmError::ValidationError("API key is required".to_string()))?;

        let mut headers = HeaderMap::new();
        for (name, value) in self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                LlmError::ValidationError(format!("invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                LlmError::ValidationError(format!("invalid value for header '{name}': {e}"))
            })?;
            headers.insert(header_name, header_value);
        }

        let config = AnthropicConfig {
            base_url,
            api_key,
            headers,
        };
        config
            .validate()
            .map_err(|e| LlmError::ValidationError(e.to_string()))?;

        tracing::debug!(base_url = %config.base_url, "Anthropic configuration validated");
        Ok(config)
    }
}
