use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::executor::RequestExecutor;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub rank: u32,
    pub username: String,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub async fn get_leaderboard(api: &RequestExecutor) -> Result<Leaderboard> {
    log::trace!("Fetching leaderboard");
    let result: Result<Leaderboard> = api.get("/api/leaderboard").await;
    match &result {
        Ok(board) => log::info!("Fetched {} leaderboard entries", board.leaderboard.len()),
        Err(e) => log::error!("Failed to fetch leaderboard: {}", e),
    }
    result
}
