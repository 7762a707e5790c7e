//! The chooser controller: starts selections and routes inbound events.

use std::fmt;

use chooser_core::{
    ChooserConfig, ChooserError, FinishAction, InboundEvent, Interaction, MessageKey, TextMessage,
    Transport, TransportError,
};
use chooser_utils::pagination::{
    ActionTag, page_offset, parse_action_tag, parse_one_based_page, render_keyboard, total_pages,
};
use tracing::{debug, info, warn};
use twilight_model::channel::message::component::Component;

use crate::registry::{PendingPageEntries, SessionRegistry};
use crate::session::{HandlerFuture, Selection, Session};

/// What [`Chooser::dispatch`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The event carries no chooser tag, or the chat is not awaiting a page number.
    NotForChooser,
    /// A chooser event whose session is gone or whose payload is stale.
    Ignored,
    Chosen,
    Cancelled,
    /// Controls were re-rendered at `offset`.
    Navigated { offset: usize },
    /// The chat was prompted for a typed page number.
    AwaitingPageEntry,
    /// Typed text was not a valid page; the chat stays in page entry.
    PageEntryRejected,
    /// Controls were re-rendered at the typed page.
    PageJumped { page: usize },
    /// The page-entry target message could no longer be edited.
    PageJumpAborted,
}

impl DispatchOutcome {
    /// Whether the chooser consumed the event.
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::NotForChooser)
    }
}

/// A routed event, carrying the finished selection's handler if there is one.
///
/// The handler has not been polled yet. Release any lock held around the
/// chooser before calling [`Dispatched::complete`], so the handler is free to
/// use the chooser itself.
#[must_use = "a finished selection's handler only runs once completed"]
pub struct Dispatched {
    outcome: DispatchOutcome,
    handler: Option<HandlerFuture>,
}

impl Dispatched {
    fn with_handler(outcome: DispatchOutcome, handler: HandlerFuture) -> Self {
        Self {
            outcome,
            handler: Some(handler),
        }
    }

    pub fn outcome(&self) -> DispatchOutcome {
        self.outcome
    }

    /// Whether a choose or cancel handler is waiting to run.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Run the pending handler, if any, and return the outcome.
    pub async fn complete(self) -> Result<DispatchOutcome, ChooserError> {
        if let Some(handler) = self.handler {
            handler
                .await
                .map_err(|source| ChooserError::Handler(source.into()))?;
        }

        Ok(self.outcome)
    }
}

impl From<DispatchOutcome> for Dispatched {
    fn from(outcome: DispatchOutcome) -> Self {
        Self {
            outcome,
            handler: None,
        }
    }
}

impl fmt::Debug for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatched")
            .field("outcome", &self.outcome)
            .field("has_handler", &self.has_handler())
            .finish()
    }
}

/// Paginated selection controller.
///
/// Owns the session registry and the pending page-entry map, and drives the
/// host transport. Every method takes `&mut self`; hosts that receive events
/// concurrently wrap the chooser in a mutex so events are handled one at a time.
/// Choose and cancel handlers never run inside these methods; they come back
/// in [`Dispatched`] for the host to run once the mutex is released.
pub struct Chooser<T> {
    config: ChooserConfig,
    transport: T,
    sessions: SessionRegistry,
    pending: PendingPageEntries,
}

impl<T: Transport> Chooser<T> {
    /// Create a chooser, rejecting invalid configuration.
    pub fn new(config: ChooserConfig, transport: T) -> Result<Self, ChooserError> {
        config.validate()?;

        Ok(Self {
            config,
            transport,
            sessions: SessionRegistry::new(),
            pending: PendingPageEntries::new(),
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn pending(&self) -> &PendingPageEntries {
        &self.pending
    }

    /// Start a selection on an existing message.
    ///
    /// Renders the first page onto `message` and registers the session,
    /// replacing any selection already attached to it. Nothing is registered
    /// when the transport fails.
    pub async fn start(
        &mut self,
        message: MessageKey,
        selection: Selection,
    ) -> Result<(), ChooserError> {
        let page_size = selection.page_size.unwrap_or(self.config.page_size);
        self.config.check_page_size(page_size)?;

        let controls = render_keyboard(&self.config, 0, &selection.options, page_size);
        self.transport.attach_controls(message, &controls).await?;

        let session = Session {
            options: selection.options,
            page_size,
            finish: selection.finish.unwrap_or(self.config.finish),
            on_choose: selection.on_choose,
            on_cancel: selection.on_cancel,
        };

        info!(
            channel_id = message.channel_id.get(),
            message_id = message.message_id.get(),
            options = session.options.len(),
            page_size,
            "selection started"
        );

        self.pending.clear_for(message);
        if self.sessions.insert(message, session).is_some() {
            debug!(%message, "replaced an existing selection");
        }

        Ok(())
    }

    /// Handle one inbound event.
    ///
    /// A choice or cancel finishes the selection here. Its handler is returned
    /// unpolled in the [`Dispatched`] value.
    pub async fn dispatch(&mut self, event: InboundEvent) -> Result<Dispatched, ChooserError> {
        match event {
            InboundEvent::Action(interaction) => self.handle_action(interaction).await,
            InboundEvent::Text(text) => self.submit_page_entry(text).await.map(Dispatched::from),
        }
    }

    async fn handle_action(&mut self, interaction: Interaction) -> Result<Dispatched, ChooserError> {
        let Some(action) = parse_action_tag(&interaction.action_tag, &self.config.tags) else {
            return Ok(DispatchOutcome::NotForChooser.into());
        };

        let message = interaction.message;
        if !self.sessions.contains(message) {
            debug!(%message, ?action, "no active selection, ignoring");
            return Ok(DispatchOutcome::Ignored.into());
        }

        match action {
            ActionTag::Choose(index) => self.choose(interaction, index).await,
            ActionTag::Cancel => self.cancel(interaction).await,
            ActionTag::Prev(offset) | ActionTag::Next(offset) => {
                self.navigate(message, offset).await.map(Dispatched::from)
            }
            ActionTag::PageEntry => self.open_page_entry(message).await.map(Dispatched::from),
        }
    }

    async fn choose(
        &mut self,
        interaction: Interaction,
        index: usize,
    ) -> Result<Dispatched, ChooserError> {
        let message = interaction.message;
        let in_range = self
            .sessions
            .get(message)
            .is_some_and(|session| index < session.options.len());
        if !in_range {
            debug!(%message, index, "choice index outside the option list, ignoring");
            return Ok(DispatchOutcome::Ignored.into());
        }

        let Some(session) = self.take_session(message) else {
            return Ok(DispatchOutcome::Ignored.into());
        };
        let mut session = self.release_controls(message, session).await?;

        let choice = session.options.swap_remove(index);
        info!(%message, %choice, "selection chosen");

        let handler = (session.on_choose)(interaction, choice);
        Ok(Dispatched::with_handler(DispatchOutcome::Chosen, handler))
    }

    async fn cancel(&mut self, interaction: Interaction) -> Result<Dispatched, ChooserError> {
        let message = interaction.message;
        let Some(session) = self.take_session(message) else {
            return Ok(DispatchOutcome::Ignored.into());
        };
        let session = self.release_controls(message, session).await?;

        info!(%message, "selection cancelled");

        let dispatched = match session.on_cancel {
            Some(on_cancel) => {
                Dispatched::with_handler(DispatchOutcome::Cancelled, on_cancel(interaction))
            }
            None => DispatchOutcome::Cancelled.into(),
        };
        Ok(dispatched)
    }

    async fn navigate(
        &mut self,
        message: MessageKey,
        offset: usize,
    ) -> Result<DispatchOutcome, ChooserError> {
        let Some(controls) = self.render_at(message, offset) else {
            debug!(%message, offset, "navigation target outside the option list, ignoring");
            return Ok(DispatchOutcome::Ignored);
        };

        self.transport.attach_controls(message, &controls).await?;
        Ok(DispatchOutcome::Navigated { offset })
    }

    async fn open_page_entry(
        &mut self,
        message: MessageKey,
    ) -> Result<DispatchOutcome, ChooserError> {
        if let Some(previous) = self.pending.begin(message)
            && previous != message
        {
            debug!(%message, %previous, "page entry moved to another selection");
        }

        if let Err(error) = self
            .transport
            .prompt(message.channel_id, &self.config.page_prompt_text)
            .await
        {
            self.pending.clear_for(message);
            return Err(error.into());
        }

        Ok(DispatchOutcome::AwaitingPageEntry)
    }

    async fn submit_page_entry(
        &mut self,
        text: TextMessage,
    ) -> Result<DispatchOutcome, ChooserError> {
        let Some(message) = self.pending.get(text.channel_id) else {
            return Ok(DispatchOutcome::NotForChooser);
        };

        let Some(session) = self.sessions.get(message) else {
            self.pending.clear(text.channel_id);
            debug!(%message, "page entry target has no active selection, dropping entry");
            return Ok(DispatchOutcome::Ignored);
        };

        let total = total_pages(session.options.len(), session.page_size);
        let page_size = session.page_size;

        let page = match validate_page_input(&text.content, total) {
            Ok(page) => page,
            Err(error) => {
                debug!(%message, %error, "rejected page entry");
                self.transport
                    .send_text(text.channel_id, &self.config.page_error_text)
                    .await?;
                return Ok(DispatchOutcome::PageEntryRejected);
            }
        };

        self.pending.clear(text.channel_id);

        let offset = page_offset(page, page_size);
        let Some(controls) = self.render_at(message, offset) else {
            return Ok(DispatchOutcome::Ignored);
        };

        match self.transport.attach_controls(message, &controls).await {
            Ok(()) => Ok(DispatchOutcome::PageJumped { page }),
            Err(source) => {
                // The user may have deleted the message while typing.
                warn!(?source, %message, page, "could not apply page jump");
                Ok(DispatchOutcome::PageJumpAborted)
            }
        }
    }

    /// Render `message`'s session at `offset`, if both exist.
    fn render_at(&self, message: MessageKey, offset: usize) -> Option<Vec<Component>> {
        let session = self.sessions.get(message)?;
        let len = session.options.len();
        if offset >= len && offset != 0 {
            return None;
        }

        Some(render_keyboard(
            &self.config,
            offset,
            &session.options,
            session.page_size,
        ))
    }

    fn take_session(&mut self, message: MessageKey) -> Option<Session> {
        match self.sessions.finalize(message) {
            Ok(session) => Some(session),
            Err(error) => {
                debug!(%error, "selection already finalized");
                None
            }
        }
    }

    /// Delete the message or strip its controls, per the session.
    ///
    /// A message that is already gone counts as released. Once released, any
    /// page entry pointing at the message is dropped. Any other failure puts
    /// the session back, page entry untouched, so the user can try again.
    async fn release_controls(
        &mut self,
        message: MessageKey,
        session: Session,
    ) -> Result<Session, ChooserError> {
        let result = match session.finish {
            FinishAction::DeleteMessage => self.transport.delete_message(message).await,
            FinishAction::StripControls => self.transport.remove_controls(message).await,
        };

        match result {
            Ok(()) => {}
            Err(TransportError::NotFound) => {
                debug!(%message, "message already gone while finishing selection");
            }
            Err(error) => {
                self.sessions.insert(message, session);
                return Err(error.into());
            }
        }

        self.pending.clear_for(message);
        Ok(session)
    }
}

fn validate_page_input(raw: &str, total_pages: usize) -> Result<usize, ChooserError> {
    parse_one_based_page(raw, total_pages)
        .ok_or_else(|| ChooserError::InvalidPageInput(raw.trim().to_owned()))
}
