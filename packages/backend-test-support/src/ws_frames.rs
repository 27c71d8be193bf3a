//! Assertions over websocket JSON frames.

use serde_json::Value;

/// The `type` tag of a server frame, or `""` when absent.
pub fn frame_type(frame: &Value) -> &str {
    frame.get("type").and_then(Value::as_str).unwrap_or("")
}

/// Assert `frame` is an `error` frame with the given code.
pub fn assert_error_frame(frame: &Value, expected_code: &str) {
    assert_eq!(frame_type(frame), "error", "expected error frame, got {frame}");
    assert_eq!(
        frame.get("code").and_then(Value::as_str),
        Some(expected_code),
        "unexpected error code in {frame}"
    );
    assert!(
        frame.get("message").and_then(Value::as_str).is_some(),
        "error frame without message: {frame}"
    );
}

/// Agent states of a `state_update` or `snapshot` frame, in ring order.
pub fn agent_states(frame: &Value) -> Vec<String> {
    frame
        .get("agents")
        .and_then(Value::as_array)
        .map(|agents| {
            agents
                .iter()
                .map(|a| a.get("state").and_then(Value::as_str).unwrap_or("").to_string())
                .collect()
        })
        .unwrap_or_default()
}
