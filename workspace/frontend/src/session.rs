//! Session wiring for the browser.
//!
//! [`ApiProvider`] owns the transport and the [`Session`] for the whole app.
//! Components build their own executor from the context (see
//! [`crate::hooks::use_api`]) so every screen tracks its own request state
//! while sharing one token.

use client::{Session, SessionController, Transport};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::common::toast::ToastContext;
use crate::settings;
use crate::transport::GlooTransport;

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Forgets the stored token and sends the user back to the login page
pub struct BrowserSession {
    on_expired: Callback<()>,
}

impl SessionController for BrowserSession {
    fn logout(&self) {
        log::warn!("Session rejected by the server, logging out");
        settings::clear_token();
        self.on_expired.emit(());
    }
}

#[derive(Clone)]
pub struct ApiContext {
    pub transport: Rc<dyn Transport>,
    pub session: Rc<Session>,
    pub base_url: String,
}

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.transport, &other.transport)
            && Rc::ptr_eq(&self.session, &other.session)
            && self.base_url == other.base_url
    }
}

#[derive(Properties, PartialEq)]
pub struct ApiProviderProps {
    pub children: Children,
}

/// Must be rendered inside the router and the toast provider
#[function_component(ApiProvider)]
pub fn api_provider(props: &ApiProviderProps) -> Html {
    let toast_ctx = use_context::<ToastContext>().expect("ApiProvider requires a ToastProvider");
    let navigator = use_navigator().expect("ApiProvider requires a router");

    let context = use_memo((), move |_| {
        let on_expired = Callback::from(move |_| {
            toast_ctx.show_warning(SESSION_EXPIRED_MESSAGE.to_string());
            navigator.push(&Route::Login);
        });
        let controller: Rc<dyn SessionController> = Rc::new(BrowserSession { on_expired });
        let session = match settings::stored_token() {
            Some(token) => {
                log::debug!("Restoring stored session token");
                Session::with_token(controller, token)
            }
            None => Session::new(controller),
        };

        let base_url = settings::get_settings().api_base_url();
        log::debug!("API base URL: {}", base_url);
        ApiContext {
            transport: Rc::new(GlooTransport),
            session: Rc::new(session),
            base_url,
        }
    });

    html! {
        <ContextProvider<ApiContext> context={(*context).clone()}>
            {props.children.clone()}
        </ContextProvider<ApiContext>>
    }
}
