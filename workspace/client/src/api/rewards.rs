use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::executor::RequestExecutor;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cost: u64,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Reward {
    pub fn affordable_with(&self, coins: u64) -> bool {
        self.available && coins >= self.cost
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RewardCatalog {
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    #[serde(alias = "_id")]
    pub id: String,
    pub reward_id: String,
    #[serde(default)]
    pub reward_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub redeemed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemResponse {
    pub redemption: Redemption,
    #[serde(default)]
    pub remaining_coins: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RedemptionHistory {
    #[serde(default)]
    pub redemptions: Vec<Redemption>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest<'a> {
    pub reward_id: &'a str,
}

pub async fn get_rewards(api: &RequestExecutor) -> Result<RewardCatalog> {
    log::trace!("Fetching reward catalog");
    let result: Result<RewardCatalog> = api.get("/api/rewards").await;
    match &result {
        Ok(catalog) => log::info!("Fetched {} rewards", catalog.rewards.len()),
        Err(e) => log::error!("Failed to fetch rewards: {}", e),
    }
    result
}

pub async fn redeem_reward(api: &RequestExecutor, reward_id: &str) -> Result<RedeemResponse> {
    log::debug!("Redeeming reward {}", reward_id);
    let result: Result<RedeemResponse> = api.post("/api/rewards/redeem", &RedeemRequest { reward_id }).await;
    match &result {
        Ok(redeemed) => log::info!(
            "Redeemed reward {} ({} coins left)",
            reward_id,
            redeemed.remaining_coins
        ),
        Err(e) => log::error!("Failed to redeem reward {}: {}", reward_id, e),
    }
    result
}

pub async fn get_redemptions(api: &RequestExecutor) -> Result<RedemptionHistory> {
    log::trace!("Fetching redemption history");
    let result: Result<RedemptionHistory> = api.get("/api/rewards/history").await;
    match &result {
        Ok(history) => log::info!("Fetched {} redemptions", history.redemptions.len()),
        Err(e) => log::error!("Failed to fetch redemption history: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;

    #[test]
    fn test_affordability() {
        let reward = Reward {
            id: "r1".to_string(),
            name: "Sticker pack".to_string(),
            description: None,
            cost: 100,
            available: true,
        };
        assert!(reward.affordable_with(100));
        assert!(!reward.affordable_with(99));
        assert!(!Reward { available: false, ..reward }.affordable_with(1000));
    }

    #[tokio::test]
    async fn test_redeem_reward() {
        let h = harness();
        h.transport.respond(
            200,
            r#"{"redemption":{"_id":"x1","rewardId":"r1","code":"DSA-42"},"remainingCoins":20}"#,
        );

        let redeemed = redeem_reward(&h.executor, "r1").await.unwrap();

        assert_eq!(redeemed.redemption.code.as_deref(), Some("DSA-42"));
        assert_eq!(redeemed.remaining_coins, 20);
        assert_eq!(h.transport.last_request().body.as_deref(), Some(r#"{"rewardId":"r1"}"#));
    }

    #[tokio::test]
    async fn test_catalog_defaults_available() {
        let h = harness();
        h.transport.respond(200, r#"{"rewards":[{"id":"r2","name":"T-shirt","cost":500}]}"#);

        let catalog = get_rewards(&h.executor).await.unwrap();
        assert!(catalog.rewards[0].available);
    }
}
