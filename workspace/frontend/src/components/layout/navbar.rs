use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::session::ApiContext;
use crate::settings;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
    #[prop_or_default]
    pub on_refresh: Option<Callback<()>>,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let api_ctx = use_context::<ApiContext>().expect("Navbar requires an ApiProvider");
    let navigator = use_navigator();
    let trigger = use_force_update();

    let on_logout = {
        let session = api_ctx.session.clone();
        Callback::from(move |_| {
            log::info!("User logged out");
            settings::clear_token();
            session.sign_out();
            trigger.force_update();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="app-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-2">
                {if let Some(on_refresh) = &props.on_refresh {
                    let on_refresh = on_refresh.clone();
                    html! {
                        <button class="btn btn-ghost btn-circle" title="Refresh"
                            onclick={Callback::from(move |_| on_refresh.emit(()))}>
                            <i class="fas fa-sync-alt"></i>
                        </button>
                    }
                } else {
                    html! {}
                }}
                {if api_ctx.session.is_authenticated() {
                    html! {
                        <button class="btn btn-ghost btn-sm" onclick={on_logout}>
                            <i class="fas fa-sign-out-alt"></i>{" Log out"}
                        </button>
                    }
                } else {
                    html! {
                        <Link<Route> to={Route::Login} classes="btn btn-primary btn-sm">{"Log in"}</Link<Route>>
                    }
                }}
            </div>
        </div>
    }
}
