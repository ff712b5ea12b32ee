use super::*;

/// Status implied by an Anthropic error type, for errors that arrive without
/// an HTTP status (in-band stream `error` events).
pub fn default_status_for_error_type(error_type: &str) -> u16 {
    match error_type {
        "invalid_request_error" => 400,
        "authentication_error" => 401,
        "permission_error" => 403,
        "not_found_error" => 404,
        "request_too_large" => 413,
        "rate_limit_error" => 429,
        "overloaded_error" => 529,
        _ => 500,
    }
}

/// Map an Anthropic error payload to an [`LlmError::ApiError`].
pub fn map_anthropic_error(
    status_code: u16,
    error: &AnthropicErrorBody,
    error_details: serde_json::Value,
) -> LlmError {
    let message = &error.message;
    let (code, message) = match error.error_type.as_str() {
        "authentication_error" => (status_code, format!("Authentication failed: {message}")),
        "permission_error" => (status_code, format!("Permission denied: {message}")),
        "rate_limit_error" => (status_code, format!("Rate limited: {message}")),
        // Overloaded is reported as a synthetic 529 whatever the transport status.
        "overloaded_error" => (529, format!("Anthropic service overloaded: {message}")),
        "" => (status_code, message.clone()),
        other => (
            status_code,
            format!("Anthropic API error ({other}): {message}"),
        ),
    };

    LlmError::ApiError {
        code,
        message,
        details: Some(error_details),
    }
}
