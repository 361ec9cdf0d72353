use client::api::progress::get_progress;
use client::api::rewards::{Redemption, Reward, get_redemptions, get_rewards, redeem_reward};
use client::ApiError;
use yew::prelude::*;

use super::reward_card::RewardCard;
use crate::common::error::{ErrorBanner, ErrorDisplay};
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::components::login::LoginRequired;
use crate::hooks::{use_api, use_loading, use_loading_with_error};

#[derive(Clone, PartialEq)]
struct Shop {
    rewards: Vec<Reward>,
    redemptions: Vec<Redemption>,
    coins: u64,
}

#[function_component(Rewards)]
pub fn rewards() -> Html {
    let api = use_api();
    let loading = use_loading();
    let redeeming = use_loading_with_error();
    let toast_ctx = use_context::<ToastContext>().expect("Rewards requires a ToastProvider");
    let shop = use_state(|| None::<Shop>);
    let load_error = use_state(|| None::<String>);
    let pending_reward = use_state(|| None::<String>);
    let authenticated = api.session().is_authenticated();

    let refetch = {
        let api = api.clone();
        let loading = loading.clone();
        let shop = shop.clone();
        let load_error = load_error.clone();
        let toast_ctx = toast_ctx.clone();
        use_callback((), move |_: (), _| {
            let api = api.clone();
            let loading = loading.clone();
            let shop = shop.clone();
            let load_error = load_error.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result: Result<Shop, ApiError> = loading
                    .with_loading(
                        || async {
                            let catalog = get_rewards(&api).await?;
                            let history = get_redemptions(&api).await?;
                            let progress = get_progress(&api).await?;
                            Ok(Shop {
                                rewards: catalog.rewards,
                                redemptions: history.redemptions,
                                coins: progress.coins,
                            })
                        },
                        Some("Loading rewards..."),
                    )
                    .await;
                match result {
                    Ok(data) => {
                        load_error.set(None);
                        shop.set(Some(data));
                    }
                    Err(e) => {
                        toast_ctx.show_api_error(&e);
                        load_error.set(Some(e.user_message()));
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

    let on_redeem = {
        let api = api.clone();
        let redeeming = redeeming.clone();
        let shop = shop.clone();
        let pending_reward = pending_reward.clone();
        Callback::from(move |reward_id: String| {
            let api = api.clone();
            let redeeming = redeeming.clone();
            let shop = shop.clone();
            let pending_reward = pending_reward.clone();
            let toast_ctx = toast_ctx.clone();
            pending_reward.set(Some(reward_id.clone()));
            wasm_bindgen_futures::spawn_local(async move {
                let result = redeeming
                    .with_loading(|| redeem_reward(&api, &reward_id), Some("Redeeming reward..."))
                    .await;
                pending_reward.set(None);
                // Failures stay on the coordinator and show in the banner
                if let Ok(response) = result {
                    toast_ctx.show_success(match &response.redemption.code {
                        Some(code) => format!("Reward redeemed! Your code: {}", code),
                        None => "Reward redeemed!".to_string(),
                    });
                    if let Some(current) = &*shop {
                        let mut updated = current.clone();
                        updated.coins = response.remaining_coins;
                        updated.redemptions.insert(0, response.redemption);
                        shop.set(Some(updated));
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let redeeming = redeeming.clone();
        Callback::from(move |_| redeeming.clear_error())
    };

    if !authenticated {
        return html! { <LoginRequired /> };
    }
    if loading.is_loading() {
        return html! { <Loading text={Some(loading.loading_text())} /> };
    }
    if let Some(message) = &*load_error {
        return html! { <ErrorDisplay message={message.clone()} on_retry={Some(refetch)} /> };
    }
    let Some(shop) = &*shop else {
        return html! {};
    };

    html! {
        <>
            <div class="flex justify-between items-center mb-4">
                <h2 class="text-2xl font-bold">{"Rewards"}</h2>
                <span class="badge badge-lg badge-warning gap-2"><i class="fas fa-coins"></i>{format!("{} coins", shop.coins)}</span>
            </div>
            <ErrorBanner error={redeeming.error()} on_dismiss={Some(on_dismiss)} />
            <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4">
                {for shop.rewards.iter().map(|reward| html! {
                    <RewardCard
                        key={reward.id.clone()}
                        reward={reward.clone()}
                        coins={shop.coins}
                        redeeming={redeeming.is_loading() && pending_reward.as_deref() == Some(reward.id.as_str())}
                        disabled={redeeming.is_loading()}
                        on_redeem={on_redeem.clone()}
                    />
                })}
            </div>
            <div class="card bg-base-100 shadow mt-6">
                <div class="card-body">
                    <h2 class="card-title">{"History"}</h2>
                    {if shop.redemptions.is_empty() {
                        html! { <p class="text-gray-500">{"Nothing redeemed yet."}</p> }
                    } else {
                        html! {
                            <table class="table">
                                <thead><tr><th>{"Reward"}</th><th>{"Code"}</th><th>{"Date"}</th></tr></thead>
                                <tbody>
                                    {for shop.redemptions.iter().map(|redemption| html! {
                                        <tr key={redemption.id.clone()}>
                                            <td>{redemption.reward_name.clone().unwrap_or_else(|| redemption.reward_id.clone())}</td>
                                            <td class="font-mono">{redemption.code.clone().unwrap_or_default()}</td>
                                            <td>{redemption.redeemed_at.clone().unwrap_or_default()}</td>
                                        </tr>
                                    })}
                                </tbody>
                            </table>
                        }
                    }}
                </div>
            </div>
        </>
    }
}
