use super::*;

/// Raw reason reported when a stream ends without any `stop_reason`.
pub const DEFAULT_RAW_FINISH_REASON: &str = "other";

/// Map a Messages API `stop_reason` to the unified classification.
pub fn map_stop_reason(reason: Option<&str>) -> UnifiedFinishReason {
    match reason {
        Some("end_turn") | Some("stop_sequence") => UnifiedFinishReason::Stop,
        Some("max_tokens") => UnifiedFinishReason::Length,
        Some("tool_use") => UnifiedFinishReason::ToolCalls,
        _ => UnifiedFinishReason::Other,
    }
}

/// Unified finish reason that keeps the raw value.
pub fn map_finish_reason(raw: Option<&str>) -> FinishReason {
    FinishReason {
        unified: map_stop_reason(raw),
        raw: raw.map(str::to_string),
    }
}
