use anyhow::Result;
use client::RequestExecutor;
use client::api::progress::{self, GameProgress};
use tracing::trace;

use crate::cli::reporting;

pub async fn progress(api: &RequestExecutor) -> Result<GameProgress> {
    trace!("Entering progress command");
    let loading = reporting::loading();

    let progress = loading
        .with_loading(|| progress::get_progress(api), Some("Loading your progress..."))
        .await?;

    println!(
        "Level {}  |  {} XP  |  {} coins  |  {} day streak",
        progress.level, progress.xp, progress.coins, progress.streak_days
    );
    for topic in &progress.topics {
        println!(
            "  {:<24} {:>3}/{:<3} {:>3}%",
            topic.topic,
            topic.completed_levels,
            topic.total_levels,
            topic.percent()
        );
    }
    Ok(progress)
}
