use log::Level;
use web_sys::{Storage, window};

const TOKEN_KEY: &str = "dsaquest_token";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Backend API port (e.g., 5000)
    pub api_port: u16,

    /// Path prefix in front of every `/api/...` endpoint, usually empty
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 5000,
            api_path: String::new(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

fn local_storage() -> Option<Storage> {
    window().and_then(|window| window.local_storage().ok().flatten())
}

impl AppSettings {
    /// Create settings from the window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                } else {
                    // Served next to the backend in production
                    settings.api_host = hostname;
                    settings.api_use_https = window.location().protocol().map(|p| p == "https:").unwrap_or(false);
                    settings.api_port = if settings.api_use_https { 443 } else { 80 };
                }
            }
        }

        if let Some(storage) = local_storage() {
            if let Ok(Some(api_host)) = storage.get_item("dsaquest_api_host") {
                settings.api_host = api_host;
            }
            if let Ok(Some(api_port)) = storage.get_item("dsaquest_api_port") {
                if let Ok(port_val) = api_port.parse::<u16>() {
                    settings.api_port = port_val;
                }
            }
            if let Ok(Some(api_path)) = storage.get_item("dsaquest_api_path") {
                settings.api_path = api_path;
            }
            if let Ok(Some(use_https)) = storage.get_item("dsaquest_api_use_https") {
                settings.api_use_https = use_https.to_lowercase() == "true";
            }
            if let Ok(Some(log_level)) = storage.get_item("dsaquest_log_level") {
                settings.log_level = match log_level.to_lowercase().as_str() {
                    "error" => Level::Error,
                    "warn" => Level::Warn,
                    "info" => Level::Info,
                    "debug" => Level::Debug,
                    "trace" => Level::Trace,
                    _ => settings.log_level,
                };
            }
            if let Ok(Some(duration)) = storage.get_item("dsaquest_toast_duration_ms") {
                if let Ok(duration_val) = duration.parse::<u32>() {
                    settings.toast_duration_ms = duration_val;
                }
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port + path prefix)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }
}

/// Token persisted between page loads
pub fn stored_token() -> Option<String> {
    local_storage().and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
}

pub fn store_token(token: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(TOKEN_KEY, token).is_err() {
            log::warn!("Failed to persist session token");
        }
    }
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
