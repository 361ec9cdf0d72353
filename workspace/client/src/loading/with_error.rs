use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;

use super::{DEFAULT_LOADING_TEXT, Release, text_or_default};
use crate::listener::Listener;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadingWithErrorState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub loading_text: String,
}

impl Default for LoadingWithErrorState {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
        }
    }
}

/// Loading flag plus the message of the last failed operation.
///
/// The recorded error is for display only: failures are still returned to the
/// caller.
#[derive(Debug, Default)]
pub struct LoadingWithErrorCoordinator {
    state: RefCell<LoadingWithErrorState>,
    listener: Listener,
}

impl LoadingWithErrorCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadingWithErrorState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn loading_text(&self) -> String {
        self.state.borrow().loading_text.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn set_listener(&self, callback: impl Fn() + 'static) {
        self.listener.set(callback);
    }

    pub fn start_loading(&self, text: Option<&str>) {
        {
            let mut state = self.state.borrow_mut();
            state.is_loading = true;
            state.loading_text = text_or_default(text);
        }
        self.listener.notify();
    }

    pub fn stop_loading(&self) {
        let changed = std::mem::replace(&mut self.state.borrow_mut().is_loading, false);
        if changed {
            self.listener.notify();
        }
    }

    pub fn set_error(&self, message: impl Into<String>) {
        self.state.borrow_mut().error = Some(message.into());
        self.listener.notify();
    }

    pub fn clear_error(&self) {
        if self.state.borrow_mut().error.take().is_some() {
            self.listener.notify();
        }
    }

    /// Run `operation`, recording its error message if it fails
    pub async fn with_loading<T, E, F, Fut>(&self, operation: F, text: Option<&str>) -> Result<T, E>
    where
        E: Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.clear_error();
        self.start_loading(text);
        let release = Release::new(|| self.stop_loading());
        let result = operation().await;
        drop(release);

        if let Err(e) = &result {
            log::warn!("Operation failed: {}", e);
            self.set_error(e.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_success_leaves_no_error() {
        let coordinator = LoadingWithErrorCoordinator::new();

        let result = coordinator
            .with_loading(
                || async {
                    assert!(coordinator.is_loading());
                    assert_eq!(coordinator.loading_text(), "Redeeming reward...");
                    Ok::<_, String>("voucher")
                },
                Some("Redeeming reward..."),
            )
            .await;

        assert_eq!(result, Ok("voucher"));
        assert_eq!(coordinator.state().error, None);
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn test_failure_records_message_and_rethrows() {
        let coordinator = LoadingWithErrorCoordinator::new();

        let result = coordinator
            .with_loading(
                || async {
                    Err::<(), _>(ApiError::from_response(402, r#"{"message":"Not enough coins"}"#))
                },
                None,
            )
            .await;

        assert_eq!(result.unwrap_err().status(), Some(402));
        assert_eq!(coordinator.error().as_deref(), Some("Not enough coins"));
        assert!(!coordinator.is_loading());
    }

    #[tokio::test]
    async fn test_previous_error_cleared_on_retry() {
        let coordinator = LoadingWithErrorCoordinator::new();
        coordinator.set_error("stale");

        coordinator
            .with_loading(
                || async {
                    assert_eq!(coordinator.error(), None);
                    Ok::<_, String>(())
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(coordinator.error(), None);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let coordinator = LoadingWithErrorCoordinator::new();
        coordinator.set_error("kept");
        let before = coordinator.state();

        coordinator.stop_loading();

        assert_eq!(coordinator.state(), before);
    }
}
