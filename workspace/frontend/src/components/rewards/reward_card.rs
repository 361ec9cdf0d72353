use client::api::rewards::Reward;
use yew::prelude::*;

use crate::common::loading::ButtonSpinner;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub reward: Reward,
    pub coins: u64,
    /// Set while this card's redemption is in flight
    pub redeeming: bool,
    /// Any redemption in flight disables every card
    pub disabled: bool,
    pub on_redeem: Callback<String>,
}

#[function_component(RewardCard)]
pub fn reward_card(props: &Props) -> Html {
    let affordable = props.reward.affordable_with(props.coins);
    let onclick = {
        let on_redeem = props.on_redeem.clone();
        let id = props.reward.id.clone();
        Callback::from(move |_| on_redeem.emit(id.clone()))
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">{&props.reward.name}</h3>
                {if let Some(description) = &props.reward.description {
                    html! { <p class="text-sm text-gray-500">{description}</p> }
                } else {
                    html! {}
                }}
                <div class="card-actions justify-between items-center mt-2">
                    <span class="badge badge-warning gap-1"><i class="fas fa-coins"></i>{props.reward.cost}</span>
                    <button class="btn btn-primary btn-sm" {onclick} disabled={!affordable || props.disabled}>
                        <ButtonSpinner loading={props.redeeming}>{"Redeem"}</ButtonSpinner>
                    </button>
                </div>
            </div>
        </div>
    }
}
