use anyhow::Result;
use client::RequestExecutor;
use client::api::friends::{self, FriendList, FriendRequestList};
use tracing::{info, trace};

use crate::cli::reporting;

/// Panels of the friends screen, loaded independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FriendsPanel {
    Friends,
    Requests,
}

/// Load friends and pending requests concurrently
pub async fn list(api: &RequestExecutor) -> Result<(FriendList, FriendRequestList)> {
    trace!("Entering friends list command");
    let loading = reporting::multi_loading([FriendsPanel::Friends, FriendsPanel::Requests]);

    let (friend_list, request_list) = tokio::join!(
        loading.with_loading(&FriendsPanel::Friends, || friends::get_friends(api)),
        loading.with_loading(&FriendsPanel::Requests, || friends::get_friend_requests(api)),
    );
    let (friend_list, request_list) = (friend_list?, request_list?);

    println!("Friends ({}):", friend_list.friends.len());
    for friend in &friend_list.friends {
        let status = if friend.online { "online" } else { "offline" };
        println!("  {:<20} {:>8} XP  {}  [{}]", friend.username, friend.xp, status, friend.id);
    }
    println!("Pending requests ({}):", request_list.requests.len());
    for request in &request_list.requests {
        let from = request.from_username.as_deref().unwrap_or(&request.from_user_id);
        println!("  {} from {}", request.id, from);
    }
    Ok((friend_list, request_list))
}

pub async fn add(api: &RequestExecutor, user_id: &str) -> Result<()> {
    let loading = reporting::loading();
    loading
        .with_loading(|| friends::send_friend_request(api, user_id), Some("Sending friend request..."))
        .await?;
    println!("Friend request sent to {}", user_id);
    Ok(())
}

/// Accept every listed request concurrently; fails on the first rejection
pub async fn accept(api: &RequestExecutor, request_ids: &[String]) -> Result<()> {
    let loading = reporting::loading();
    let operations = request_ids
        .iter()
        .map(|request_id| friends::accept_friend_request(api, request_id));

    let accepted = loading
        .with_multiple_loading(operations, Some("Accepting friend requests..."))
        .await?;

    info!("Accepted {} friend requests", accepted.len());
    println!("Accepted {} friend request(s)", accepted.len());
    Ok(())
}

pub async fn reject(api: &RequestExecutor, request_id: &str) -> Result<()> {
    let loading = reporting::loading();
    loading
        .with_loading(|| friends::reject_friend_request(api, request_id), Some("Rejecting friend request..."))
        .await?;
    println!("Rejected request {}", request_id);
    Ok(())
}

pub async fn remove(api: &RequestExecutor, friend_id: &str) -> Result<()> {
    let loading = reporting::loading();
    loading
        .with_loading(|| friends::remove_friend(api, friend_id), Some("Removing friend..."))
        .await?;
    println!("Removed {} from your friends", friend_id);
    Ok(())
}
