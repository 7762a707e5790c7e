//! Shared vocabulary for the chooser workspace.
//!
//! Message identity, inbound events, the transport seam, configuration and the
//! error taxonomy live here so the layout helpers and the router agree on them.

/// Chooser configuration (labels, routing tags, page sizing).
pub mod config;
/// Error taxonomy shared by the router and its hosts.
pub mod error;
/// Message identity and inbound interaction events.
pub mod event;
/// Messaging transport seam.
pub mod transport;

pub use config::{ChooserConfig, FinishAction, TagSet};
pub use error::{ChooserError, TransportError};
pub use event::{InboundEvent, Interaction, MessageKey, TextMessage};
pub use transport::Transport;
