//! Notification parser - Extracts message references from webhook deliveries

use serde_json::Value;

use crate::application::errors::BotError;
use crate::domain::entities::Notification;

/// Parse a webhook delivery of the form `{"data": {"id": ..., "roomId": ...}}`
pub fn parse_notification(payload: &Value) -> Result<Notification, BotError> {
    let data = payload
        .get("data")
        .ok_or_else(|| BotError::MalformedNotification("missing 'data'".to_string()))?;

    let field = |name: &str| {
        data.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| BotError::MalformedNotification(format!("missing 'data.{}'", name)))
    };

    Ok(Notification {
        resource_id: field("id")?,
        room_id: field("roomId")?,
    })
}

/// Parse a raw request body
pub fn parse_notification_bytes(body: &[u8]) -> Result<Notification, BotError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| BotError::MalformedNotification(format!("invalid JSON: {}", e)))?;
    parse_notification(&payload)
}

/// Everything after the first occurrence of `command` in `text`, untrimmed.
///
/// Returns the whole text when the command does not occur.
pub fn extract_remainder(command: &str, text: &str) -> String {
    match text.find(command) {
        Some(idx) => text[idx + command.len()..].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_remainder_keeps_whitespace() {
        assert_eq!(extract_remainder("/echo", "/echo hello"), " hello");
        assert_eq!(extract_remainder("/echo", "say /echo  twice"), "  twice");
        assert_eq!(extract_remainder("/echo", "/echo"), "");
    }

    #[test]
    fn test_extract_remainder_uses_first_occurrence() {
        assert_eq!(extract_remainder("/echo", "/echo a /echo b"), " a /echo b");
    }

    #[test]
    fn test_extract_remainder_without_command() {
        assert_eq!(extract_remainder("/echo", "plain"), "plain");
    }

    #[test]
    fn test_parse_notification() {
        let payload = json!({
            "id": "webhook-1",
            "name": "testbot",
            "resource": "messages",
            "event": "created",
            "data": {
                "id": "incoming_message_id",
                "roomId": "room-1",
                "personEmail": "alice@example.com"
            }
        });

        let n = parse_notification(&payload).unwrap();
        assert_eq!(n.resource_id, "incoming_message_id");
        assert_eq!(n.room_id, "room-1");
    }

    #[test]
    fn test_parse_notification_missing_fields() {
        for payload in [
            json!({}),
            json!({ "data": { "roomId": "room-1" } }),
            json!({ "data": { "id": "msg-1" } }),
            json!({ "data": { "id": "", "roomId": "room-1" } }),
            json!({ "data": { "id": 7, "roomId": "room-1" } }),
        ] {
            assert!(matches!(
                parse_notification(&payload),
                Err(BotError::MalformedNotification(_))
            ));
        }
    }

    #[test]
    fn test_parse_notification_bytes_rejects_garbage() {
        assert!(matches!(
            parse_notification_bytes(b"not json"),
            Err(BotError::MalformedNotification(_))
        ));
    }
}
