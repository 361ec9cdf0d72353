use client::api::auth::{self, AuthResponse};
use client::ApiError;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::common::error::ErrorBanner;
use crate::common::form::{field, read_form};
use crate::common::loading::ButtonSpinner;
use crate::common::toast::ToastContext;
use crate::hooks::{use_api, use_loading_with_error};
use crate::settings;

/// Shown in place of screens that need a signed-in user
#[function_component(LoginRequired)]
pub fn login_required() -> Html {
    html! {
        <div class="hero py-12">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h2 class="text-2xl font-bold">{"Sign in to continue"}</h2>
                    <p class="py-4 text-gray-500">{"Your progress, friends and rewards are tied to your account."}</p>
                    <Link<Route> to={Route::Login} classes="btn btn-primary">{"Log in"}</Link<Route>>
                </div>
            </div>
        </div>
    }
}

#[function_component(Login)]
pub fn login() -> Html {
    let api = use_api();
    let coordinator = use_loading_with_error();
    let toast_ctx = use_context::<ToastContext>().expect("Login requires a ToastProvider");
    let navigator = use_navigator();
    let registering = use_state(|| false);
    let form_ref = use_node_ref();

    let on_toggle = {
        let registering = registering.clone();
        let coordinator = coordinator.clone();
        Callback::from(move |_| {
            coordinator.clear_error();
            registering.set(!*registering);
        })
    };

    let on_submit = {
        let api = api.clone();
        let coordinator = coordinator.clone();
        let form_ref = form_ref.clone();
        let registering = *registering;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form_data) = read_form(&form_ref) else {
                log::error!("Login form is not mounted");
                return;
            };
            let username = field(&form_data, "username");
            let email = field(&form_data, "email");
            let password = form_data.get("password").as_string().unwrap_or_default();

            let api = api.clone();
            let coordinator = coordinator.clone();
            let toast_ctx = toast_ctx.clone();
            let navigator = navigator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = if registering { "Creating account..." } else { "Signing in..." };
                let result: Result<AuthResponse, ApiError> = coordinator
                    .with_loading(
                        || async {
                            if registering {
                                auth::register(&api, &username, &email, &password).await
                            } else {
                                auth::login(&api, &email, &password).await
                            }
                        },
                        Some(text),
                    )
                    .await;

                // The coordinator already holds the message for the banner
                if let Ok(auth) = result {
                    settings::store_token(&auth.token);
                    toast_ctx.show_success(format!("Welcome, {}!", auth.user.username));
                    if let Some(navigator) = navigator {
                        navigator.push(&Route::Dashboard);
                    }
                }
            });
        })
    };

    let busy = coordinator.is_loading();

    html! {
        <div class="flex justify-center py-12">
            <div class="card w-full max-w-sm bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{if *registering { "Create account" } else { "Log in" }}</h2>
                    <ErrorBanner error={coordinator.error()} />
                    <form ref={form_ref} onsubmit={on_submit} class="space-y-4">
                        {if *registering {
                            html! {
                                <input name="username" type="text" placeholder="Username" class="input input-bordered w-full" required=true />
                            }
                        } else {
                            html! {}
                        }}
                        <input name="email" type="email" placeholder="Email" class="input input-bordered w-full" required=true />
                        <input name="password" type="password" placeholder="Password" class="input input-bordered w-full" required=true />
                        <button type="submit" class="btn btn-primary w-full" disabled={busy}>
                            <ButtonSpinner loading={busy}>
                                {if *registering { "Register" } else { "Log in" }}
                            </ButtonSpinner>
                        </button>
                    </form>
                    <button class="btn btn-link btn-sm" onclick={on_toggle}>
                        {if *registering { "Already have an account? Log in" } else { "New here? Create an account" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
