//! In-memory session and page-entry stores owned by a [`crate::Chooser`].

use std::collections::HashMap;

use chooser_core::{ChooserError, MessageKey};
use twilight_model::id::{Id, marker::ChannelMarker};

use crate::session::Session;

/// Active selections keyed by the message carrying their controls.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<MessageKey, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session, returning the one it replaced.
    pub fn insert(&mut self, message: MessageKey, session: Session) -> Option<Session> {
        self.sessions.insert(message, session)
    }

    /// Remove and return the session for `message`.
    pub fn finalize(&mut self, message: MessageKey) -> Result<Session, ChooserError> {
        self.sessions
            .remove(&message)
            .ok_or(ChooserError::SessionNotFound(message))
    }

    pub fn get(&self, message: MessageKey) -> Option<&Session> {
        self.sessions.get(&message)
    }

    pub fn contains(&self, message: MessageKey) -> bool {
        self.sessions.contains_key(&message)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Chats currently waiting for a typed page number, and the message it targets.
#[derive(Debug, Default)]
pub struct PendingPageEntries {
    entries: HashMap<Id<ChannelMarker>, MessageKey>,
}

impl PendingPageEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `message`'s chat as awaiting page entry, replacing any older entry.
    pub fn begin(&mut self, message: MessageKey) -> Option<MessageKey> {
        self.entries.insert(message.channel_id, message)
    }

    pub fn get(&self, channel_id: Id<ChannelMarker>) -> Option<MessageKey> {
        self.entries.get(&channel_id).copied()
    }

    pub fn clear(&mut self, channel_id: Id<ChannelMarker>) -> Option<MessageKey> {
        self.entries.remove(&channel_id)
    }

    /// Drop the chat's entry only if it still targets `message`.
    pub fn clear_for(&mut self, message: MessageKey) -> bool {
        if self.get(message.channel_id) == Some(message) {
            self.entries.remove(&message.channel_id);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chooser_core::FinishAction;

    use super::*;
    use crate::session::Selection;

    fn key(channel: u64, message: u64) -> MessageKey {
        MessageKey::new(Id::new(channel), Id::new(message))
    }

    fn session(options: &[&str]) -> Session {
        let selection = Selection::new(options.iter().copied(), |_, _| async { anyhow::Ok(()) });
        Session {
            options: selection.options,
            page_size: 2,
            finish: FinishAction::DeleteMessage,
            on_choose: selection.on_choose,
            on_cancel: None,
        }
    }

    #[test]
    fn insert_replaces_instead_of_merging() {
        let mut registry = SessionRegistry::new();
        assert!(registry.insert(key(1, 10), session(&["a", "b"])).is_none());

        let replaced = registry.insert(key(1, 10), session(&["z"]));
        assert_eq!(replaced.map(|old| old.options), Some(vec!["a".to_owned(), "b".to_owned()]));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(key(1, 10)).map(Session::options), Some(&["z".to_owned()][..]));
    }

    #[test]
    fn finalize_removes_once() {
        let mut registry = SessionRegistry::new();
        registry.insert(key(1, 10), session(&["a"]));

        assert!(registry.finalize(key(1, 10)).is_ok());
        assert!(registry.is_empty());
        assert!(matches!(
            registry.finalize(key(1, 10)),
            Err(ChooserError::SessionNotFound(missing)) if missing == key(1, 10)
        ));
    }

    #[test]
    fn same_message_id_in_other_channel_is_a_different_session() {
        let mut registry = SessionRegistry::new();
        registry.insert(key(1, 10), session(&["a"]));
        assert!(!registry.contains(key(2, 10)));
    }

    #[test]
    fn pending_entries_are_one_per_chat() {
        let mut pending = PendingPageEntries::new();
        assert_eq!(pending.begin(key(1, 10)), None);
        assert_eq!(pending.begin(key(1, 11)), Some(key(1, 10)));
        pending.begin(key(2, 20));

        assert_eq!(pending.len(), 2);
        assert_eq!(pending.get(Id::new(1)), Some(key(1, 11)));

        assert!(!pending.clear_for(key(1, 10)));
        assert!(pending.clear_for(key(1, 11)));
        assert_eq!(pending.clear(Id::new(2)), Some(key(2, 20)));
        assert!(pending.is_empty());
    }
}
