use anyhow::Result;
use client::RequestExecutor;
use client::api::rewards::{self, RedeemResponse, RedemptionHistory, RewardCatalog};
use tracing::{trace, warn};

use crate::cli::reporting;

pub async fn list(api: &RequestExecutor) -> Result<RewardCatalog> {
    trace!("Entering rewards list command");
    let loading = reporting::loading();

    let catalog = loading
        .with_loading(|| rewards::get_rewards(api), Some("Loading rewards..."))
        .await?;

    for reward in &catalog.rewards {
        let availability = if reward.available { "" } else { "  (sold out)" };
        println!("  [{}] {:<28} {:>6} coins{}", reward.id, reward.name, reward.cost, availability);
    }
    Ok(catalog)
}

/// Redeem a reward; the failure message is shown the way the rewards screen does
pub async fn redeem(api: &RequestExecutor, reward_id: &str) -> Result<RedeemResponse> {
    trace!("Entering rewards redeem command");
    let loading = reporting::loading_with_error();

    let result = loading
        .with_loading(|| rewards::redeem_reward(api, reward_id), Some("Redeeming reward..."))
        .await;

    match result {
        Ok(redeemed) => {
            let name = redeemed.redemption.reward_name.as_deref().unwrap_or(reward_id);
            println!("Redeemed {}! {} coins left.", name, redeemed.remaining_coins);
            if let Some(code) = &redeemed.redemption.code {
                println!("Your code: {}", code);
            }
            Ok(redeemed)
        }
        Err(e) => {
            if let Some(message) = loading.error() {
                warn!("Redemption failed: {}", message);
                eprintln!("Could not redeem reward: {}", message);
            }
            Err(e.into())
        }
    }
}

pub async fn history(api: &RequestExecutor) -> Result<RedemptionHistory> {
    let loading = reporting::loading();

    let history = loading
        .with_loading(|| rewards::get_redemptions(api), Some("Loading redemption history..."))
        .await?;

    if history.redemptions.is_empty() {
        println!("No rewards redeemed yet.");
    }
    for redemption in &history.redemptions {
        println!(
            "  {}  {}  {}",
            redemption.redeemed_at.as_deref().unwrap_or("-"),
            redemption.reward_name.as_deref().unwrap_or(&redemption.reward_id),
            redemption.code.as_deref().unwrap_or("")
        );
    }
    Ok(history)
}
