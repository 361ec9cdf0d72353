use client::api::progress::{GameProgress, get_progress};
use yew::prelude::*;

use super::topic_progress::TopicProgressList;
use crate::common::error::ErrorDisplay;
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::components::login::LoginRequired;
use crate::hooks::{use_api, use_loading};

#[derive(Properties, PartialEq)]
struct StatProps {
    title: &'static str,
    value: String,
    icon: &'static str,
}

#[function_component(Stat)]
fn stat(props: &StatProps) -> Html {
    html! {
        <div class="stat">
            <div class="stat-figure text-primary"><i class={classes!("fas", props.icon, "text-2xl")}></i></div>
            <div class="stat-title">{props.title}</div>
            <div class="stat-value">{&props.value}</div>
        </div>
    }
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    log::trace!("Dashboard component rendering");
    let api = use_api();
    let loading = use_loading();
    let toast_ctx = use_context::<ToastContext>().expect("Dashboard requires a ToastProvider");
    let progress = use_state(|| None::<GameProgress>);
    let error = use_state(|| None::<String>);
    let authenticated = api.session().is_authenticated();

    let refetch = {
        let api = api.clone();
        let loading = loading.clone();
        let progress = progress.clone();
        let error = error.clone();
        use_callback((), move |_: (), _| {
            let api = api.clone();
            let loading = loading.clone();
            let progress = progress.clone();
            let error = error.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match loading.with_loading(|| get_progress(&api), Some("Loading your progress...")).await {
                    Ok(data) => {
                        error.set(None);
                        progress.set(Some(data));
                    }
                    Err(e) => {
                        toast_ctx.show_api_error(&e);
                        error.set(Some(e.user_message()));
                    }
                }
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(authenticated, move |authenticated| {
            if *authenticated {
                refetch.emit(());
            }
            || ()
        });
    }

    if !authenticated {
        return html! { <LoginRequired /> };
    }
    if loading.is_loading() {
        return html! { <Loading text={Some(loading.loading_text())} /> };
    }
    if let Some(message) = &*error {
        let on_retry = refetch.clone();
        return html! { <ErrorDisplay message={message.clone()} on_retry={Some(on_retry)} /> };
    }

    match &*progress {
        Some(progress) => html! {
            <>
                <div class="stats stats-vertical lg:stats-horizontal shadow w-full bg-base-100">
                    <Stat title="Level" value={progress.level.to_string()} icon="fa-layer-group" />
                    <Stat title="XP" value={progress.xp.to_string()} icon="fa-star" />
                    <Stat title="Coins" value={progress.coins.to_string()} icon="fa-coins" />
                    <Stat title="Streak" value={format!("{} days", progress.streak_days)} icon="fa-fire" />
                </div>
                <div class="card bg-base-100 shadow mt-6">
                    <div class="card-body">
                        <h2 class="card-title">{"Topics"}</h2>
                        <TopicProgressList topics={progress.topics.clone()} />
                    </div>
                </div>
            </>
        },
        None => html! {},
    }
}
