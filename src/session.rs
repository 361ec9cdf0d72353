use client::SessionController;
use std::cell::Cell;
use tracing::warn;

/// Session controller for the terminal: a 401 marks the session expired
#[derive(Debug, Default)]
pub struct CliSession {
    expired: Cell<bool>,
}

impl CliSession {
    pub fn is_expired(&self) -> bool {
        self.expired.get()
    }
}

impl SessionController for CliSession {
    fn logout(&self) {
        if !self.expired.replace(true) {
            warn!("Session expired, run `dsaquest login` and export the new DSAQUEST_TOKEN");
        }
    }
}
