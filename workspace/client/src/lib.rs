//! Request execution and loading-state coordination for the DSA Quest client.
//!
//! - [`executor::RequestExecutor`] issues one request at a time, records the
//!   last failure, and terminates the [`session::Session`] on 401.
//! - [`loading`] holds the three loading coordinators used by every screen.
//! - [`api`] contains typed endpoint functions per feature.
//!
//! Everything here is single-threaded: state lives in `RefCell`s and futures
//! are driven by one cooperative executor (the browser event loop or a tokio
//! current-thread runtime).

pub mod api;
pub mod error;
pub mod executor;
pub mod listener;
pub mod loading;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ApiError, FALLBACK_MESSAGE};
pub use executor::{RequestConfig, RequestExecutor, RequestState};
pub use loading::{LoadingCoordinator, LoadingWithErrorCoordinator, MultiLoadingCoordinator};
pub use session::{Session, SessionController};
pub use transport::{Headers, HttpRequest, HttpResponse, Method, Transport};
