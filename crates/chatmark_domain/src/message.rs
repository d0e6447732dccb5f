use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Setters, Serialize, Deserialize)]
#[setters(into)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// In-memory message history of one run, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_conversation_keeps_push_order() {
        let mut fixture = Conversation::default();
        fixture.push(ChatMessage::user("q"));
        fixture.push(ChatMessage::assistant("a"));
        let actual: Vec<_> = fixture.messages().iter().map(|m| m.content.as_str()).collect();
        let expected = vec!["q", "a"];
        assert_eq!(actual, expected);
        assert_eq!(fixture.len(), 2);
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::Assistant.to_string(), "assistant");
        let actual = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        let expected = serde_json::json!({"role": "user", "content": "hi"});
        assert_eq!(actual, expected);
    }
}
