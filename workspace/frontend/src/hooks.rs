//! Hooks binding the client coordinators to component re-rendering.
//!
//! Each hook keeps one coordinator per component instance and points its
//! listener at a forced re-render, so reading `is_loading()` or `error()`
//! during render always sees the current state.

use client::{LoadingCoordinator, LoadingWithErrorCoordinator, MultiLoadingCoordinator, RequestExecutor};
use std::fmt::Debug;
use std::rc::Rc;
use yew::prelude::*;

use crate::session::ApiContext;

#[hook]
pub fn use_loading() -> Rc<LoadingCoordinator> {
    let trigger = use_force_update();
    let coordinator = use_memo((), |_| LoadingCoordinator::new());
    coordinator.set_listener(move || trigger.force_update());
    coordinator
}

/// Keys are fixed on first render; later changes to `keys` are ignored
#[hook]
pub fn use_multiple_loading<K>(keys: Vec<K>) -> Rc<MultiLoadingCoordinator<K>>
where
    K: Ord + Clone + Debug + 'static,
{
    let trigger = use_force_update();
    let coordinator = use_memo((), move |_| MultiLoadingCoordinator::new(keys));
    coordinator.set_listener(move || trigger.force_update());
    coordinator
}

#[hook]
pub fn use_loading_with_error() -> Rc<LoadingWithErrorCoordinator> {
    let trigger = use_force_update();
    let coordinator = use_memo((), |_| LoadingWithErrorCoordinator::new());
    coordinator.set_listener(move || trigger.force_update());
    coordinator
}

/// Request executor for this component, sharing the app-wide session
#[hook]
pub fn use_api() -> Rc<RequestExecutor> {
    let context = use_context::<ApiContext>().expect("use_api requires an ApiProvider");
    let trigger = use_force_update();
    let executor = use_memo(context, |context| {
        RequestExecutor::new(context.transport.clone(), context.session.clone(), context.base_url.clone())
    });
    executor.set_listener(move || trigger.force_update());
    executor
}
