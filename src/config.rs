use client::{RequestExecutor, Session};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::session::CliSession;
use crate::transport::ReqwestTransport;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API URL must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Connection settings resolved from CLI arguments and the environment
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Everything a command needs to talk to the backend
pub struct AppContext {
    pub api: RequestExecutor,
    pub session: Rc<CliSession>,
}

impl ClientSettings {
    /// Wire the reqwest transport, the session and the executor together
    pub fn connect(&self) -> Result<AppContext, ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }

        debug!("Request timeout: {:?}", self.timeout);
        let transport = Rc::new(ReqwestTransport::new(self.timeout)?);
        let controller = Rc::new(CliSession::default());
        let session = match &self.token {
            Some(token) if !token.is_empty() => Rc::new(Session::with_token(controller.clone(), token.clone())),
            _ => Rc::new(Session::new(controller.clone())),
        };

        info!("Using backend at {}", self.api_url);
        Ok(AppContext {
            api: RequestExecutor::new(transport, session, self.api_url.clone()),
            session: controller,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let settings = ClientSettings {
            api_url: "localhost:5000".to_string(),
            ..Default::default()
        };
        assert!(matches!(settings.connect(), Err(ConfigError::InvalidApiUrl(_))));
    }

    #[test]
    fn test_token_signs_session_in() {
        let settings = ClientSettings {
            token: Some("jwt".to_string()),
            ..Default::default()
        };
        let context = settings.connect().unwrap();
        assert!(context.api.session().is_authenticated());

        let anonymous = ClientSettings {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(!anonymous.connect().unwrap().api.session().is_authenticated());
    }
}
