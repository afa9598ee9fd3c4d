use super::{ChatMessage, Message};

/// Ordered, append-only conversation history.
///
/// Insertion order matters: the transcript is sent verbatim as the prompt
/// history. Past messages are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent `limit` messages, oldest first.
    pub fn recent(&self, limit: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(limit);
        &self.messages[start..]
    }

    /// A copy of the history with `message` appended. `self` is left as is.
    pub fn with_appended(&self, message: Message) -> Vec<Message> {
        let mut candidate = Vec::with_capacity(self.messages.len() + 1);
        candidate.extend_from_slice(&self.messages);
        candidate.push(message);
        candidate
    }

    /// Whether `candidate` starts with every message of this transcript.
    pub fn is_prefix_of(&self, candidate: &[Message]) -> bool {
        candidate.len() >= self.messages.len()
            && candidate[..self.messages.len()] == self.messages[..]
    }

    pub fn to_chat_messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().map(ChatMessage::from).collect()
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn test_recent_returns_tail_in_order() {
        let mut transcript = Transcript::new();
        for i in 0..5 {
            transcript.push(Message::user(format!("m{}", i)));
        }

        let recent: Vec<&str> = transcript.recent(2).iter().map(|m| m.content()).collect();
        assert_eq!(recent, vec!["m3", "m4"]);
        assert_eq!(transcript.recent(10).len(), 5);
    }

    #[test]
    fn test_with_appended_leaves_original_untouched() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("hello"));

        let candidate = transcript.with_appended(Message::assistant("hi"));

        assert_eq!(transcript.len(), 1);
        assert_eq!(candidate.len(), 2);
        assert!(transcript.is_prefix_of(&candidate));
        assert_eq!(candidate[1].role(), Role::Assistant);
    }

    #[test]
    fn test_prefix_check_rejects_diverging_history() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("one"));

        let other = vec![Message::user("one")];
        // Same text but a different id is a different message.
        assert!(!transcript.is_prefix_of(&other));
        assert!(Transcript::new().is_prefix_of(&other));
    }

    #[test]
    fn test_to_chat_messages_keeps_role_and_content() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Olá"));
        transcript.push(Message::assistant("Olá! Como posso ajudar?"));

        assert_eq!(
            transcript.to_chat_messages(),
            vec![
                ChatMessage::new("user", "Olá"),
                ChatMessage::new("assistant", "Olá! Como posso ajudar?"),
            ]
        );
    }
}
