//! Paginated selection controller.
//!
//! [`Chooser`] keeps one [`Session`] per message carrying chooser controls,
//! renders pages through the layout engine in `chooser-utils`, and routes
//! every inbound button tap or typed page number through [`Chooser::dispatch`].
//! Finished selections hand their handler back as a [`Dispatched`] value.

mod chooser;
pub mod registry;
mod session;

pub use chooser::{Chooser, DispatchOutcome, Dispatched};
pub use registry::{PendingPageEntries, SessionRegistry};
pub use session::{CancelHandler, ChooseHandler, HandlerFuture, Selection, Session};

pub use chooser_core::{
    ChooserConfig, ChooserError, FinishAction, InboundEvent, Interaction, MessageKey, TagSet,
    TextMessage, Transport, TransportError,
};
