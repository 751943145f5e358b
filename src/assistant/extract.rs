//! Reply and usage extraction from agent responses
//!
//! Agents answer in a handful of shapes. Each strategy below handles one of
//! them; they are tried in order and the first hit wins.

use serde_json::Value;

type ReplyStrategy = fn(&Value) -> Option<String>;

const REPLY_STRATEGIES: &[ReplyStrategy] = &[
    output_field,
    reply_field,
    raw_string,
    stringified,
];

fn non_empty_field(response: &Value, field: &str) -> Option<String> {
    match response.get(field)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn output_field(response: &Value) -> Option<String> {
    non_empty_field(response, "output")
}

fn reply_field(response: &Value) -> Option<String> {
    non_empty_field(response, "reply")
}

fn raw_string(response: &Value) -> Option<String> {
    response.as_str().map(str::to_string)
}

fn stringified(response: &Value) -> Option<String> {
    Some(response.to_string())
}

/// Pull the reply text out of an agent response
pub fn extract_reply(response: &Value) -> String {
    REPLY_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(response))
        .unwrap_or_default()
}

/// Tokens reported by the agent: `usage.total_tokens`, then `tokensUsed`, else 0
pub fn extract_tokens_used(response: &Value) -> u64 {
    response
        .get("usage")
        .and_then(|u| u.get("total_tokens"))
        .and_then(Value::as_u64)
        .filter(|t| *t > 0)
        .or_else(|| response.get("tokensUsed").and_then(Value::as_u64))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_field_wins() {
        let response = json!({"output": "from output", "reply": "from reply"});
        assert_eq!(extract_reply(&response), "from output");
    }

    #[test]
    fn test_reply_field_when_output_missing_or_empty() {
        assert_eq!(extract_reply(&json!({"reply": "hi"})), "hi");
        assert_eq!(extract_reply(&json!({"output": "", "reply": "hi"})), "hi");
        assert_eq!(extract_reply(&json!({"output": null, "reply": "hi"})), "hi");
    }

    #[test]
    fn test_structured_output_is_stringified() {
        let response = json!({"output": {"text": "nested"}});
        assert_eq!(extract_reply(&response), r#"{"text":"nested"}"#);
    }

    #[test]
    fn test_raw_string_response() {
        assert_eq!(extract_reply(&json!("plain answer")), "plain answer");
    }

    #[test]
    fn test_fallback_stringifies_whole_response() {
        let response = json!({"answer": "elsewhere"});
        assert_eq!(extract_reply(&response), r#"{"answer":"elsewhere"}"#);
    }

    #[test]
    fn test_tokens_used_sources() {
        assert_eq!(extract_tokens_used(&json!({"usage": {"total_tokens": 321}})), 321);
        assert_eq!(extract_tokens_used(&json!({"tokensUsed": 17})), 17);
        assert_eq!(
            extract_tokens_used(&json!({"usage": {"total_tokens": 0}, "tokensUsed": 9})),
            9
        );
        assert_eq!(extract_tokens_used(&json!({"reply": "x"})), 0);
        assert_eq!(extract_tokens_used(&json!("text")), 0);
    }
}
