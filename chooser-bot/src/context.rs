use std::sync::Arc;

use chooser_router::Chooser;
use tokio::sync::Mutex;
use twilight_http::Client;

use crate::transport::TwilightTransport;

/// Shared application context passed into event handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    /// The chooser is locked per event so taps on one selection never race.
    pub chooser: Arc<Mutex<Chooser<TwilightTransport>>>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, chooser: Chooser<TwilightTransport>) -> Self {
        Self {
            http,
            chooser: Arc::new(Mutex::new(chooser)),
        }
    }
}
