use std::cell::RefCell;
use std::future::Future;

use super::{DEFAULT_LOADING_TEXT, Release, text_or_default};
use crate::listener::Listener;

/// Single loading flag with a status message
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    /// Only meaningful while `is_loading` is true
    pub loading_text: String,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            is_loading: false,
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
        }
    }
}

/// Tracks one in-flight operation (or one group of them) for a screen
#[derive(Debug, Default)]
pub struct LoadingCoordinator {
    state: RefCell<LoadingState>,
    listener: Listener,
}

impl LoadingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadingState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn loading_text(&self) -> String {
        self.state.borrow().loading_text.clone()
    }

    pub fn set_listener(&self, callback: impl Fn() + 'static) {
        self.listener.set(callback);
    }

    pub fn start_loading(&self, text: Option<&str>) {
        log::trace!("Loading started: {:?}", text);
        {
            let mut state = self.state.borrow_mut();
            state.is_loading = true;
            state.loading_text = text_or_default(text);
        }
        self.listener.notify();
    }

    /// No-op when already idle
    pub fn stop_loading(&self) {
        let changed = std::mem::replace(&mut self.state.borrow_mut().is_loading, false);
        if changed {
            log::trace!("Loading stopped");
            self.listener.notify();
        }
    }

    /// Run `operation` with the flag raised, returning its result untouched
    pub async fn with_loading<T, E, F, Fut>(&self, operation: F, text: Option<&str>) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.start_loading(text);
        let _release = Release::new(|| self.stop_loading());
        operation().await
    }

    /// Run all `operations` concurrently under one loading period.
    ///
    /// Resolves with every result in input order, or fails with the first
    /// error to occur; the remaining operations are dropped at that point.
    pub async fn with_multiple_loading<T, E, I, Fut>(&self, operations: I, text: Option<&str>) -> Result<Vec<T>, E>
    where
        I: IntoIterator<Item = Fut>,
        Fut: Future<Output = Result<T, E>>,
    {
        self.start_loading(text);
        let _release = Release::new(|| self.stop_loading());
        futures::future::try_join_all(operations).await
    }
}
