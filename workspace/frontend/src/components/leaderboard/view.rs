use client::api::leaderboard::{LeaderboardEntry, get_leaderboard};
use yew::prelude::*;

use crate::common::error::ErrorDisplay;
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::hooks::{use_api, use_loading};

fn rank_badge(rank: u32) -> Html {
    match rank {
        1 => html! { <i class="fas fa-medal text-yellow-500"></i> },
        2 => html! { <i class="fas fa-medal text-gray-400"></i> },
        3 => html! { <i class="fas fa-medal text-amber-700"></i> },
        _ => html! { <span>{rank}</span> },
    }
}

#[function_component(Leaderboard)]
pub fn leaderboard() -> Html {
    let api = use_api();
    let loading = use_loading();
    let toast_ctx = use_context::<ToastContext>().expect("Leaderboard requires a ToastProvider");
    let entries = use_state(Vec::<LeaderboardEntry>::new);
    let error = use_state(|| None::<String>);

    let refetch = {
        let api = api.clone();
        let loading = loading.clone();
        let entries = entries.clone();
        let error = error.clone();
        use_callback((), move |_: (), _| {
            let api = api.clone();
            let loading = loading.clone();
            let entries = entries.clone();
            let error = error.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match loading.with_loading(|| get_leaderboard(&api), Some("Loading leaderboard...")).await {
                    Ok(board) => {
                        log::debug!("Leaderboard loaded with {} entries", board.leaderboard.len());
                        error.set(None);
                        entries.set(board.leaderboard);
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
        use_effect_with((), move |_| {
            refetch.emit(());
            || ()
        });
    }

    if loading.is_loading() {
        return html! { <Loading text={Some(loading.loading_text())} /> };
    }
    if let Some(message) = &*error {
        return html! { <ErrorDisplay message={message.clone()} on_retry={Some(refetch)} /> };
    }

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body overflow-x-auto">
                <table class="table table-zebra">
                    <thead>
                        <tr><th>{"Rank"}</th><th>{"Player"}</th><th>{"Level"}</th><th class="text-right">{"XP"}</th></tr>
                    </thead>
                    <tbody>
                        {for entries.iter().map(|entry| html! {
                            <tr key={entry.username.clone()}>
                                <td>{rank_badge(entry.rank)}</td>
                                <td class="font-semibold">{&entry.username}</td>
                                <td>{entry.level}</td>
                                <td class="text-right">{entry.xp}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
