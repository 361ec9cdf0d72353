use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;

use super::Release;
use crate::listener::Listener;

/// Independent loading flags for a fixed set of keys.
///
/// The key set is decided at construction and never grows; starting or
/// stopping an unknown key is ignored. Operations under different keys may be
/// in flight at the same time. Two overlapping operations under the same key
/// share one flag, so the first to settle clears it.
#[derive(Debug)]
pub struct MultiLoadingCoordinator<K: Ord + Clone + Debug> {
    flags: RefCell<BTreeMap<K, bool>>,
    listener: Listener,
}

impl<K: Ord + Clone + Debug> MultiLoadingCoordinator<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            flags: RefCell::new(keys.into_iter().map(|key| (key, false)).collect()),
            listener: Listener::default(),
        }
    }

    pub fn keys(&self) -> Vec<K> {
        self.flags.borrow().keys().cloned().collect()
    }

    pub fn snapshot(&self) -> BTreeMap<K, bool> {
        self.flags.borrow().clone()
    }

    pub fn set_listener(&self, callback: impl Fn() + 'static) {
        self.listener.set(callback);
    }

    /// Unknown keys read as not loading
    pub fn is_loading(&self, key: &K) -> bool {
        self.flags.borrow().get(key).copied().unwrap_or(false)
    }

    pub fn is_any_loading(&self) -> bool {
        self.flags.borrow().values().any(|loading| *loading)
    }

    pub fn start_loading(&self, key: &K) {
        self.set(key, true);
    }

    pub fn stop_loading(&self, key: &K) {
        self.set(key, false);
    }

    pub async fn with_loading<T, E, F, Fut>(&self, key: &K, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.start_loading(key);
        let _release = Release::new(|| self.stop_loading(key));
        operation().await
    }

    fn set(&self, key: &K, loading: bool) {
        let changed = match self.flags.borrow_mut().get_mut(key) {
            Some(flag) => std::mem::replace(flag, loading) != loading,
            None => {
                log::warn!("Ignoring loading flag change for unknown key {:?}", key);
                return;
            }
        };
        if changed {
            log::trace!("Loading flag {:?} -> {}", key, loading);
            self.listener.notify();
        }
    }
}
