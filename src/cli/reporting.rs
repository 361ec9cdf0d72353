//! Terminal rendering of loading state.
//!
//! The coordinators only notify; these listeners turn each transition into a
//! log line so long requests show progress.

use client::{LoadingCoordinator, LoadingWithErrorCoordinator, MultiLoadingCoordinator};
use std::fmt::Debug;
use std::rc::Rc;
use tracing::{debug, info};

pub fn loading() -> Rc<LoadingCoordinator> {
    let coordinator = Rc::new(LoadingCoordinator::new());
    let weak = Rc::downgrade(&coordinator);
    coordinator.set_listener(move || {
        if let Some(coordinator) = weak.upgrade() {
            if coordinator.is_loading() {
                info!("{}", coordinator.loading_text());
            } else {
                debug!("Done");
            }
        }
    });
    coordinator
}

pub fn loading_with_error() -> Rc<LoadingWithErrorCoordinator> {
    let coordinator = Rc::new(LoadingWithErrorCoordinator::new());
    let weak = Rc::downgrade(&coordinator);
    coordinator.set_listener(move || {
        if let Some(coordinator) = weak.upgrade() {
            let state = coordinator.state();
            if state.is_loading {
                info!("{}", state.loading_text);
            } else if let Some(error) = state.error {
                debug!("Recorded error: {}", error);
            }
        }
    });
    coordinator
}

pub fn multi_loading<K>(keys: impl IntoIterator<Item = K>) -> Rc<MultiLoadingCoordinator<K>>
where
    K: Ord + Clone + Debug + 'static,
{
    let coordinator = Rc::new(MultiLoadingCoordinator::new(keys));
    let weak = Rc::downgrade(&coordinator);
    coordinator.set_listener(move || {
        if let Some(coordinator) = weak.upgrade() {
            let pending: Vec<K> = coordinator
                .snapshot()
                .into_iter()
                .filter_map(|(key, loading)| loading.then_some(key))
                .collect();
            if pending.is_empty() {
                debug!("Done");
            } else {
                info!("Loading {:?}...", pending);
            }
        }
    });
    coordinator
}
