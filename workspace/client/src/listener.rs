use std::cell::RefCell;
use std::rc::Rc;

/// Change notification slot shared by the executor and the coordinators.
///
/// The callback runs after state has been updated and all borrows released,
/// so it may read the owner's state freely.
#[derive(Default)]
pub struct Listener {
    callback: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Listener {
    pub fn set(&self, callback: impl Fn() + 'static) {
        *self.callback.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn notify(&self) {
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("attached", &self.callback.borrow().is_some())
            .finish()
    }
}
