use std::{fmt, future::Future, pin::Pin};

use chooser_core::{FinishAction, Interaction};

/// Future returned by choose/cancel handlers.
pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;
/// One-shot handler invoked with the chosen option text.
pub type ChooseHandler = Box<dyn FnOnce(Interaction, String) -> HandlerFuture + Send>;
/// One-shot handler invoked when the user cancels.
pub type CancelHandler = Box<dyn FnOnce(Interaction) -> HandlerFuture + Send>;

/// Caller request describing a selection to start on a message.
pub struct Selection {
    pub(crate) options: Vec<String>,
    pub(crate) page_size: Option<usize>,
    pub(crate) finish: Option<FinishAction>,
    pub(crate) on_choose: ChooseHandler,
    pub(crate) on_cancel: Option<CancelHandler>,
}

impl Selection {
    /// Offer `options`, calling `on_choose` with the picked text.
    pub fn new<I, S, F, Fut>(options: I, on_choose: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(Interaction, String) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            page_size: None,
            finish: None,
            on_choose: Box::new(move |interaction, choice| {
                Box::pin(on_choose(interaction, choice))
            }),
            on_cancel: None,
        }
    }

    /// Call `on_cancel` when the user taps the cancel control.
    pub fn on_cancel<F, Fut>(mut self, on_cancel: F) -> Self
    where
        F: FnOnce(Interaction) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_cancel = Some(Box::new(move |interaction| Box::pin(on_cancel(interaction))));
        self
    }

    /// Override the configured page size for this selection.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Override whether the message is deleted or stripped once finished.
    pub fn finish(mut self, finish: FinishAction) -> Self {
        self.finish = Some(finish);
        self
    }
}

/// Live selection state attached to one message.
pub struct Session {
    pub(crate) options: Vec<String>,
    pub(crate) page_size: usize,
    pub(crate) finish: FinishAction,
    pub(crate) on_choose: ChooseHandler,
    pub(crate) on_cancel: Option<CancelHandler>,
}

impl Session {
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn has_cancel_handler(&self) -> bool {
        self.on_cancel.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options.len())
            .field("page_size", &self.page_size)
            .field("finish", &self.finish)
            .field("has_cancel_handler", &self.has_cancel_handler())
            .finish_non_exhaustive()
    }
}
