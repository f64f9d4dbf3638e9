//! Wire-format decoding for the HTTP API
//!
//! Window and notifier descriptions are discriminated by a `type` tag and
//! decoded through an explicit dispatch on the tag string. Unknown tags and
//! invalid values are rejected here, before any monitor state changes.

use crate::error::DecodeError;
use crate::events::Event;
use crate::notify::{ConsoleNotifier, EmailNotifier, Notifier};
use crate::rules::{AlertRule, WindowSpec};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct WindowParams {
    count: usize,
    #[serde(rename = "sizeSeconds")]
    size_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct ConsoleParams {
    message: String,
}

#[derive(Debug, Deserialize)]
struct EmailParams {
    subject: String,
}

/// Decode a register-rule request body into an alert rule
pub fn decode_rule(body: &Value) -> Result<AlertRule, DecodeError> {
    let client = string_field(body, "client")?;
    let event_type = string_field(body, "eventType")?;

    let window = decode_window(
        body.get("window")
            .ok_or(DecodeError::MissingField("window"))?,
    )?;

    let notifier_values = body
        .get("notifiers")
        .and_then(Value::as_array)
        .ok_or(DecodeError::MissingField("notifiers"))?;
    let mut notifiers = Vec::with_capacity(notifier_values.len());
    for value in notifier_values {
        notifiers.push(decode_notifier(value)?);
    }

    Ok(AlertRule::new(client, event_type, window, notifiers))
}

/// Decode a record-event request body into an event
pub fn decode_event(body: &Value) -> Result<Event, DecodeError> {
    Ok(serde_json::from_value(body.clone())?)
}

/// Decode a window specification, dispatching on its `type` tag
pub fn decode_window(value: &Value) -> Result<WindowSpec, DecodeError> {
    match type_tag(value, "window.type")? {
        "TUMBLING_WINDOW" => {
            let params = window_params(value)?;
            Ok(WindowSpec::Tumbling {
                count: params.count,
                size_secs: params.size_seconds,
            })
        }
        "SLIDING_WINDOW" => {
            let params = window_params(value)?;
            Ok(WindowSpec::Sliding {
                count: params.count,
                size_secs: params.size_seconds,
            })
        }
        other => Err(DecodeError::UnknownWindowKind(other.to_string())),
    }
}

/// Decode a notifier description, dispatching on its `type` tag
pub fn decode_notifier(value: &Value) -> Result<Arc<dyn Notifier>, DecodeError> {
    match type_tag(value, "notifier.type")? {
        "CONSOLE" => {
            let params: ConsoleParams = serde_json::from_value(value.clone())?;
            Ok(Arc::new(ConsoleNotifier::new(params.message)))
        }
        "EMAIL" => {
            let params: EmailParams = serde_json::from_value(value.clone())?;
            Ok(Arc::new(EmailNotifier::new(params.subject)))
        }
        other => Err(DecodeError::UnknownNotifierKind(other.to_string())),
    }
}

fn window_params(value: &Value) -> Result<WindowParams, DecodeError> {
    let params: WindowParams = serde_json::from_value(value.clone())?;
    if params.count == 0 {
        return Err(DecodeError::InvalidValue(
            "count must be positive".to_string(),
        ));
    }
    if params.size_seconds == 0 {
        return Err(DecodeError::InvalidValue(
            "sizeSeconds must be positive".to_string(),
        ));
    }
    Ok(params)
}

fn string_field(body: &Value, field: &'static str) -> Result<String, DecodeError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(DecodeError::MissingField(field))
}

fn type_tag<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, DecodeError> {
    value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule_body(window: Value, notifiers: Value) -> Value {
        json!({
            "client": "acme",
            "eventType": "PAYMENT_EXCEPTION",
            "window": window,
            "notifiers": notifiers,
        })
    }

    #[test]
    fn test_decode_tumbling_rule() {
        let body = rule_body(
            json!({"type": "TUMBLING_WINDOW", "count": 2, "sizeSeconds": 10}),
            json!([{"type": "CONSOLE", "message": "too many payment errors"}]),
        );

        let rule = decode_rule(&body).unwrap();
        assert_eq!(rule.client, "acme");
        assert_eq!(rule.event_type, "PAYMENT_EXCEPTION");
        assert_eq!(
            rule.window,
            WindowSpec::Tumbling {
                count: 2,
                size_secs: 10
            }
        );
        assert_eq!(rule.notifiers.len(), 1);
    }

    #[test]
    fn test_decode_sliding_rule_with_both_notifier_kinds() {
        let body = rule_body(
            json!({"type": "SLIDING_WINDOW", "count": 3, "sizeSeconds": 5}),
            json!([
                {"type": "CONSOLE", "message": "breach"},
                {"type": "EMAIL", "subject": "Threshold breached"},
            ]),
        );

        let rule = decode_rule(&body).unwrap();
        assert_eq!(
            rule.window,
            WindowSpec::Sliding {
                count: 3,
                size_secs: 5
            }
        );
        assert_eq!(rule.notifiers.len(), 2);
    }

    #[test]
    fn test_unknown_window_kind_is_rejected() {
        let body = rule_body(
            json!({"type": "UNKNOWN", "count": 2, "sizeSeconds": 10}),
            json!([]),
        );

        let err = decode_rule(&body).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownWindowKind(kind) if kind == "UNKNOWN"));
    }

    #[test]
    fn test_unknown_notifier_kind_is_rejected() {
        let body = rule_body(
            json!({"type": "SLIDING_WINDOW", "count": 1, "sizeSeconds": 10}),
            json!([{"type": "CARRIER_PIGEON", "message": "coo"}]),
        );

        let err = decode_rule(&body).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownNotifierKind(kind) if kind == "CARRIER_PIGEON"));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let err = decode_rule(&json!({"eventType": "E"})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("client")));

        let err = decode_rule(&json!({"client": "X", "eventType": "E"})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("window")));

        let body = json!({
            "client": "X",
            "eventType": "E",
            "window": {"type": "SLIDING_WINDOW", "count": 1, "sizeSeconds": 10},
        });
        let err = decode_rule(&body).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("notifiers")));
    }

    #[test]
    fn test_window_missing_type_tag_is_rejected() {
        let body = rule_body(json!({"count": 2, "sizeSeconds": 10}), json!([]));
        let err = decode_rule(&body).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("window.type")));
    }

    #[test]
    fn test_zero_count_and_zero_size_are_rejected() {
        for window in [
            json!({"type": "TUMBLING_WINDOW", "count": 0, "sizeSeconds": 10}),
            json!({"type": "SLIDING_WINDOW", "count": 2, "sizeSeconds": 0}),
        ] {
            let err = decode_rule(&rule_body(window, json!([]))).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidValue(_)));
        }
    }

    #[test]
    fn test_non_numeric_count_is_malformed() {
        let body = rule_body(
            json!({"type": "TUMBLING_WINDOW", "count": "two", "sizeSeconds": 10}),
            json!([]),
        );
        let err = decode_rule(&body).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_decode_event() {
        let body = json!({
            "client": "acme",
            "eventType": "PAYMENT_EXCEPTION",
            "timestamp": "2026-08-05T12:00:00Z",
        });

        let event = decode_event(&body).unwrap();
        assert_eq!(event.client, "acme");
        assert_eq!(event.event_type, "PAYMENT_EXCEPTION");
    }

    #[test]
    fn test_decode_event_missing_timestamp_is_malformed() {
        let body = json!({"client": "acme", "eventType": "PAYMENT_EXCEPTION"});
        let err = decode_event(&body).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}
