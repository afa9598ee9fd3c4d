use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque message identifier, only used to keep rendered lists stable.
///
/// Ids are UUID v7, so they sort by the client clock at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A message owned by the conversation widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The `(role, content)` pair forwarded to the inference provider.
///
/// Both values are kept exactly as the caller sent them: the relay trusts the
/// shape of each message and leaves rejection to the provider. A missing field
/// is null and is left out when serialized. `id` and any other field are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub role: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Value::String(role.into()),
            content: Value::String(content.into()),
        }
    }

    /// Project an arbitrary transcript element onto its `role` and `content`.
    pub fn from_value(item: &Value) -> Self {
        Self {
            role: item.get("role").cloned().unwrap_or(Value::Null),
            content: item.get("content").cloned().unwrap_or(Value::Null),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self::new(message.role.as_str(), message.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_message_ids_are_unique_and_ordered() {
        let first = Message::user("a");
        let second = Message::user("b");

        assert_ne!(first.id(), second.id());
        assert!(first.id() < second.id());
    }

    #[test]
    fn test_chat_message_drops_extra_fields() {
        let value = serde_json::json!({
            "id": "abc",
            "role": "user",
            "content": "hi",
            "createdAt": 12
        });

        let message: ChatMessage = serde_json::from_value(value).unwrap();
        assert_eq!(message, ChatMessage::new("user", "hi"));

        let back = serde_json::to_value(&message).unwrap();
        assert_eq!(back, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_from_value_keeps_shape_as_sent() {
        let item = serde_json::json!({
            "id": "m1",
            "role": "user",
            "content": [{"type": "text", "text": "hi"}]
        });

        let message = ChatMessage::from_value(&item);
        assert_eq!(message.role, "user");
        assert_eq!(message.content, serde_json::json!([{"type": "text", "text": "hi"}]));

        let bare = ChatMessage::from_value(&serde_json::json!(42));
        assert_eq!(bare.role, Value::Null);
        assert_eq!(serde_json::to_value(&bare).unwrap(), serde_json::json!({}));
    }
}
