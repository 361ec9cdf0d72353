use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::executor::RequestExecutor;

/// Progress through one DSA topic (arrays, graphs, dynamic programming, ...)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub topic: String,
    #[serde(default)]
    pub completed_levels: u32,
    #[serde(default)]
    pub total_levels: u32,
}

impl TopicProgress {
    /// Completion in percent, 0 when the topic has no levels
    pub fn percent(&self) -> u32 {
        if self.total_levels == 0 {
            return 0;
        }
        self.completed_levels.min(self.total_levels) * 100 / self.total_levels
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameProgress {
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub topics: Vec<TopicProgress>,
}

#[derive(Debug, Serialize)]
pub struct SubmitLevelRequest {
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    #[serde(default)]
    pub xp_earned: u64,
    #[serde(default)]
    pub coins_earned: u64,
    pub progress: GameProgress,
}

pub async fn get_progress(api: &RequestExecutor) -> Result<GameProgress> {
    log::trace!("Fetching game progress");
    let result: Result<GameProgress> = api.get("/api/game/progress").await;
    match &result {
        Ok(progress) => log::info!("Fetched progress: level {} with {} XP", progress.level, progress.xp),
        Err(e) => log::error!("Failed to fetch game progress: {}", e),
    }
    result
}

pub async fn submit_level(api: &RequestExecutor, level_id: &str, score: u32) -> Result<LevelResult> {
    log::debug!("Submitting level {} with score {}", level_id, score);
    let endpoint = format!("/api/game/levels/{}/complete", level_id);
    let result: Result<LevelResult> = api.post(&endpoint, &SubmitLevelRequest { score }).await;
    match &result {
        Ok(level) => log::info!("Level {} complete: +{} XP, +{} coins", level_id, level.xp_earned, level.coins_earned),
        Err(e) => log::error!("Failed to submit level {}: {}", level_id, e),
    }
    result
}
