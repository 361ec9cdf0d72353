use anyhow::Result;
use client::RequestExecutor;
use client::api::leaderboard::{self, Leaderboard};
use tracing::trace;

use crate::cli::reporting;

pub async fn leaderboard(api: &RequestExecutor) -> Result<Leaderboard> {
    trace!("Entering leaderboard command");
    let loading = reporting::loading();

    let board = loading
        .with_loading(|| leaderboard::get_leaderboard(api), Some("Fetching leaderboard..."))
        .await?;

    if board.leaderboard.is_empty() {
        println!("Nobody is on the leaderboard yet.");
    }
    for entry in &board.leaderboard {
        println!("{:>4}. {:<20} {:>8} XP  (level {})", entry.rank, entry.username, entry.xp, entry.level);
    }
    Ok(board)
}
