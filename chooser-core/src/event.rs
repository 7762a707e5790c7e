use std::fmt;

use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker, UserMarker},
};

/// Transport identity of a message carrying chooser controls.
///
/// The channel doubles as the chat identity used for page-number entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

impl MessageKey {
    pub const fn new(channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel_id, self.message_id)
    }
}

/// A button tap on a message, as delivered by the host transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interaction {
    /// Message whose controls were activated.
    pub message: MessageKey,
    /// User who tapped the button, when the transport knows it.
    pub user_id: Option<Id<UserMarker>>,
    /// Raw action tag (button custom id).
    pub action_tag: String,
}

/// A free-text message posted in a chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMessage {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub author_id: Id<UserMarker>,
    pub content: String,
}

/// Everything the router can be asked to handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    Action(Interaction),
    Text(TextMessage),
}

impl InboundEvent {
    /// Chat the event happened in.
    pub fn channel_id(&self) -> Id<ChannelMarker> {
        match self {
            Self::Action(interaction) => interaction.message.channel_id,
            Self::Text(text) => text.channel_id,
        }
    }
}
