//! `Transport` implementation over the Discord HTTP API.

use std::sync::Arc;

use chooser_core::{MessageKey, Transport, TransportError};
use twilight_http::{Client, error::ErrorType};
use twilight_model::{
    channel::message::component::Component,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};

const NOT_FOUND: u16 = 404;

/// Chooser transport backed by a shared twilight HTTP client.
#[derive(Clone)]
pub struct TwilightTransport {
    http: Arc<Client>,
}

impl TwilightTransport {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }
}

impl Transport for TwilightTransport {
    async fn attach_controls(
        &self,
        message: MessageKey,
        controls: &[Component],
    ) -> Result<(), TransportError> {
        self.http
            .update_message(message.channel_id, message.message_id)
            .components(Some(controls))
            .await
            .map_err(map_http_error)?;

        Ok(())
    }

    async fn remove_controls(&self, message: MessageKey) -> Result<(), TransportError> {
        let empty_components: [Component; 0] = [];
        self.http
            .update_message(message.channel_id, message.message_id)
            .components(Some(&empty_components))
            .await
            .map_err(map_http_error)?;

        Ok(())
    }

    async fn delete_message(&self, message: MessageKey) -> Result<(), TransportError> {
        self.http
            .delete_message(message.channel_id, message.message_id)
            .await
            .map_err(map_http_error)?;

        Ok(())
    }

    async fn send_text(
        &self,
        channel_id: Id<ChannelMarker>,
        text: &str,
    ) -> Result<Id<MessageMarker>, TransportError> {
        let created = self
            .http
            .create_message(channel_id)
            .content(text)
            .await
            .map_err(map_http_error)?
            .model()
            .await
            .map_err(TransportError::unavailable)?;

        Ok(created.id)
    }

    async fn prompt(&self, channel_id: Id<ChannelMarker>, text: &str) -> Result<(), TransportError> {
        self.send_text(channel_id, text).await?;
        Ok(())
    }
}

/// Unknown (deleted) messages and channels come back as HTTP 404.
fn map_http_error(source: twilight_http::Error) -> TransportError {
    if let ErrorType::Response { status, .. } = source.kind()
        && status.get() == NOT_FOUND
    {
        return TransportError::NotFound;
    }

    TransportError::unavailable(source)
}
