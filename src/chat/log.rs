//! Session message log.

use super::{Message, Role};

/// Ordered, append-only record of a chat session.
///
/// Insertion order is conversation order is display order. Nothing is
/// persisted; the log lives as long as the session that owns it.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn with a fresh id and return a copy of it.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Message {
        let message = Message::new(role, content);
        self.messages.push(message.clone());
        message
    }

    /// Snapshot of every turn in insertion order.
    pub fn list_all(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Drop every turn. Only called at session boundaries.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether every id in the log is distinct.
    #[cfg(test)]
    pub fn ids_are_unique(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.messages.len());
        self.messages.iter().all(|m| seen.insert(&m.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order_with_unique_ids() {
        let mut log = MessageLog::new();
        let turns = [
            (Role::User, "hello"),
            (Role::Assistant, "hi there"),
            (Role::User, ""),
            (Role::User, "fever?"),
        ];
        for (role, content) in turns {
            log.append(role, content);
        }

        let all = log.list_all();
        assert_eq!(all.len(), turns.len());
        for (message, (role, content)) in all.iter().zip(turns) {
            assert_eq!(message.role, role);
            assert_eq!(message.content, content);
        }
        assert!(log.ids_are_unique());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut log = MessageLog::new();
        let first = log.append(Role::User, "one");
        let snapshot = log.list_all();
        log.append(Role::Assistant, "two");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0], first);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_reset_clears() {
        let mut log = MessageLog::new();
        log.append(Role::User, "one");
        log.reset();
        assert!(log.is_empty());
        assert!(log.list_all().is_empty());
    }
}
