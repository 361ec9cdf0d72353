//! Loading-state coordinators.
//!
//! Each coordinator brackets async work with a loading flag that is set before
//! the work starts and cleared on every exit path: success, failure, or the
//! future being dropped before it settles.

pub mod multi;
pub mod single;
pub mod with_error;

pub use multi::MultiLoadingCoordinator;
pub use single::{LoadingCoordinator, LoadingState};
pub use with_error::{LoadingWithErrorCoordinator, LoadingWithErrorState};

/// Text shown when the caller does not supply one
pub const DEFAULT_LOADING_TEXT: &str = "Loading...";

/// Runs the release action when dropped
pub(crate) struct Release<F: FnOnce()> {
    release: Option<F>,
}

impl<F: FnOnce()> Release<F> {
    pub(crate) fn new(release: F) -> Self {
        Self {
            release: Some(release),
        }
    }
}

impl<F: FnOnce()> Drop for Release<F> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

pub(crate) fn text_or_default(text: Option<&str>) -> String {
    text.unwrap_or(DEFAULT_LOADING_TEXT).to_string()
}
