use std::future::Future;

use twilight_model::{
    channel::message::component::Component,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};

use crate::{error::TransportError, event::MessageKey};

/// Messaging operations the chooser delegates to its host.
///
/// Implementations talk to the real chat service; the chooser never sends,
/// edits or deletes anything on its own.
pub trait Transport: Send + Sync {
    /// Replace (or attach) the control grid of an existing message.
    fn attach_controls(
        &self,
        message: MessageKey,
        controls: &[Component],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Strip every control from a message, keeping its content.
    fn remove_controls(
        &self,
        message: MessageKey,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    fn delete_message(
        &self,
        message: MessageKey,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Post a plain text message, returning its id.
    fn send_text(
        &self,
        channel_id: Id<ChannelMarker>,
        text: &str,
    ) -> impl Future<Output = Result<Id<MessageMarker>, TransportError>> + Send;

    /// Ask the user in a chat to type their next message as free text.
    fn prompt(
        &self,
        channel_id: Id<ChannelMarker>,
        text: &str,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}
