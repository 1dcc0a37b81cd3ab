use std::sync::Arc;

use crate::config::Config;
use crate::mail::Mailer;
use crate::relay::Relay;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(config: Config, mailer: Mailer) -> Self {
        let relay = Relay::new(mailer, &config.mail);
        Self {
            config: Arc::new(config),
            relay: Arc::new(relay),
        }
    }
}
