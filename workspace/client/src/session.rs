use std::cell::RefCell;
use std::rc::Rc;

/// Terminates the user's session.
///
/// Called once per request that fails with 401. Implementations must tolerate
/// being called repeatedly.
pub trait SessionController {
    fn logout(&self);
}

/// Authentication context passed explicitly to every executor.
///
/// Holds the bearer token between login and logout; nothing about the session
/// lives in global transport state.
pub struct Session {
    token: RefCell<Option<String>>,
    controller: Rc<dyn SessionController>,
}

impl Session {
    pub fn new(controller: Rc<dyn SessionController>) -> Self {
        Self {
            token: RefCell::new(None),
            controller,
        }
    }

    pub fn with_token(controller: Rc<dyn SessionController>, token: impl Into<String>) -> Self {
        let session = Self::new(controller);
        session.sign_in(token);
        session
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        log::debug!("Session signed in");
        *self.token.borrow_mut() = Some(token.into());
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// User-initiated sign-out; the controller is not involved
    pub fn sign_out(&self) {
        log::debug!("Session signed out");
        self.token.borrow_mut().take();
    }

    /// Drop the token and hand control to the session controller
    pub fn terminate(&self) {
        log::warn!("Session terminated, logging out");
        self.token.borrow_mut().take();
        self.controller.logout();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingController;

    #[test]
    fn test_terminate_clears_token_and_calls_logout() {
        let controller = Rc::new(CountingController::default());
        let session = Session::with_token(controller.clone(), "abc");
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.terminate();
        assert!(!session.is_authenticated());
        assert_eq!(controller.calls(), 1);

        // Logging out twice is harmless
        session.terminate();
        assert_eq!(controller.calls(), 2);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_sign_out_does_not_call_logout() {
        let controller = Rc::new(CountingController::default());
        let session = Session::with_token(controller.clone(), "abc");

        session.sign_out();

        assert!(!session.is_authenticated());
        assert_eq!(controller.calls(), 0);
    }
}
