use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::executor::RequestExecutor;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub coins: u64,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Log in and store the issued token in the executor's session
pub async fn login(api: &RequestExecutor, email: &str, password: &str) -> Result<AuthResponse> {
    log::debug!("Logging in as {}", email);
    let result: Result<AuthResponse> = api.post("/api/auth/login", &LoginRequest { email, password }).await;
    match &result {
        Ok(auth) => {
            api.session().sign_in(auth.token.clone());
            log::info!("Logged in as {} (ID: {})", auth.user.username, auth.user.id);
        }
        Err(e) => log::error!("Login failed for {}: {}", email, e),
    }
    result
}

/// Create an account and sign in with the issued token
pub async fn register(api: &RequestExecutor, username: &str, email: &str, password: &str) -> Result<AuthResponse> {
    log::debug!("Registering new user: {}", username);
    let request = RegisterRequest { username, email, password };
    let result: Result<AuthResponse> = api.post("/api/auth/register", &request).await;
    match &result {
        Ok(auth) => {
            api.session().sign_in(auth.token.clone());
            log::info!("Registered user {} (ID: {})", auth.user.username, auth.user.id);
        }
        Err(e) => log::error!("Registration failed for '{}': {}", username, e),
    }
    result
}

pub async fn current_user(api: &RequestExecutor) -> Result<User> {
    log::trace!("Fetching current user");
    let result = api.get("/api/auth/me").await;
    if let Err(e) = &result {
        log::error!("Failed to fetch current user: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingController, MockTransport};
    use crate::session::Session;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_login_signs_session_in() {
        let transport = Rc::new(MockTransport::default());
        let session = Rc::new(Session::new(Rc::new(CountingController::default())));
        let api = RequestExecutor::new(transport.clone(), session.clone(), "http://backend.test");
        transport.respond(200, r#"{"token":"jwt-1","user":{"_id":"u1","username":"ada","xp":40}}"#);
        transport.respond(200, r#"{"id":"u1","username":"ada"}"#);

        let auth = login(&api, "ada@example.com", "secret").await.unwrap();
        assert_eq!(auth.user.id, "u1");
        assert_eq!(auth.user.xp, 40);
        assert_eq!(session.token().as_deref(), Some("jwt-1"));
        assert_eq!(
            transport.last_request().body.as_deref(),
            Some(r#"{"email":"ada@example.com","password":"secret"}"#)
        );
        assert_eq!(transport.last_request().headers.get("authorization"), None);

        current_user(&api).await.unwrap();
        assert_eq!(transport.last_request().headers.get("authorization"), Some("Bearer jwt-1"));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_session_signed_out() {
        let transport = Rc::new(MockTransport::default());
        let session = Rc::new(Session::new(Rc::new(CountingController::default())));
        let api = RequestExecutor::new(transport.clone(), session.clone(), "http://backend.test");
        transport.respond(400, r#"{"message":"Invalid credentials"}"#);

        let err = login(&api, "ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!session.is_authenticated());
    }
}
