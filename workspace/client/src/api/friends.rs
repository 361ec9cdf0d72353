use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::executor::RequestExecutor;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub online: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub from_user_id: String,
    #[serde(default)]
    pub from_username: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FriendList {
    #[serde(default)]
    pub friends: Vec<Friend>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FriendRequestList {
    #[serde(default)]
    pub requests: Vec<FriendRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest<'a> {
    pub to_user_id: &'a str,
}

/// Acknowledgement returned by mutating friend endpoints
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FriendAck {
    #[serde(default)]
    pub message: Option<String>,
}

pub async fn get_friends(api: &RequestExecutor) -> Result<FriendList> {
    log::trace!("Fetching friends");
    let result: Result<FriendList> = api.get("/api/user/friends").await;
    match &result {
        Ok(list) => log::info!("Fetched {} friends", list.friends.len()),
        Err(e) => log::error!("Failed to fetch friends: {}", e),
    }
    result
}

pub async fn get_friend_requests(api: &RequestExecutor) -> Result<FriendRequestList> {
    log::trace!("Fetching pending friend requests");
    let result: Result<FriendRequestList> = api.get("/api/user/friends/requests").await;
    match &result {
        Ok(list) => log::info!("Fetched {} pending friend requests", list.requests.len()),
        Err(e) => log::error!("Failed to fetch friend requests: {}", e),
    }
    result
}

pub async fn send_friend_request(api: &RequestExecutor, to_user_id: &str) -> Result<FriendAck> {
    log::debug!("Sending friend request to user {}", to_user_id);
    let result = api
        .post("/api/user/friends/request", &SendFriendRequest { to_user_id })
        .await;
    match &result {
        Ok(_) => log::info!("Friend request sent to user {}", to_user_id),
        Err(e) => log::error!("Failed to send friend request to {}: {}", to_user_id, e),
    }
    result
}

pub async fn accept_friend_request(api: &RequestExecutor, request_id: &str) -> Result<FriendAck> {
    respond_to_request(api, request_id, "accept").await
}

pub async fn reject_friend_request(api: &RequestExecutor, request_id: &str) -> Result<FriendAck> {
    respond_to_request(api, request_id, "reject").await
}

async fn respond_to_request(api: &RequestExecutor, request_id: &str, action: &str) -> Result<FriendAck> {
    log::debug!("Friend request {}: {}", request_id, action);
    let endpoint = format!("/api/user/friends/request/{}/{}", request_id, action);
    let result = api.put(&endpoint, &serde_json::json!({})).await;
    match &result {
        Ok(_) => log::info!("Friend request {} handled: {}", request_id, action),
        Err(e) => log::error!("Failed to {} friend request {}: {}", action, request_id, e),
    }
    result
}

pub async fn remove_friend(api: &RequestExecutor, friend_id: &str) -> Result<()> {
    log::debug!("Removing friend {}", friend_id);
    let result = api
        .delete::<IgnoredAny>(&format!("/api/user/friends/{}", friend_id))
        .await
        .map(|_| ());
    match &result {
        Ok(_) => log::info!("Removed friend {}", friend_id),
        Err(e) => log::error!("Failed to remove friend {}: {}", friend_id, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;
    use crate::transport::Method;

    #[tokio::test]
    async fn test_send_friend_request_body() {
        let h = harness();
        h.transport.respond(201, r#"{"message":"Request sent"}"#);

        let ack = send_friend_request(&h.executor, "u1").await.unwrap();

        assert_eq!(ack.message.as_deref(), Some("Request sent"));
        let request = h.transport.last_request();
        assert_eq!(request.url, "http://backend.test/api/user/friends/request");
        assert_eq!(request.body.as_deref(), Some(r#"{"toUserId":"u1"}"#));
    }

    #[tokio::test]
    async fn test_accept_and_remove_paths() {
        let h = harness();
        h.transport.respond(200, "{}");
        h.transport.respond(204, "");

        accept_friend_request(&h.executor, "req-9").await.unwrap();
        let request = h.transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "http://backend.test/api/user/friends/request/req-9/accept");

        remove_friend(&h.executor, "u2").await.unwrap();
        assert_eq!(h.transport.last_request().method, Method::Delete);
    }

    #[tokio::test]
    async fn test_lists_tolerate_missing_fields() {
        let h = harness();
        h.transport.respond(200, r#"{"friends":[{"_id":"u3","username":"grace"}]}"#);
        h.transport.respond(200, r#"{}"#);

        let friends = get_friends(&h.executor).await.unwrap();
        assert_eq!(friends.friends[0].id, "u3");
        assert!(!friends.friends[0].online);

        let requests = get_friend_requests(&h.executor).await.unwrap();
        assert!(requests.requests.is_empty());
    }
}
