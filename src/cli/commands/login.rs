use anyhow::Result;
use client::RequestExecutor;
use client::api::auth::{self, AuthResponse};
use tracing::{info, trace};

use crate::cli::reporting;

pub async fn login(api: &RequestExecutor, email: &str, password: &str) -> Result<AuthResponse> {
    trace!("Entering login command");
    let loading = reporting::loading();

    let auth = loading
        .with_loading(|| auth::login(api, email, password), Some("Signing in..."))
        .await?;

    info!("Signed in as {}", auth.user.username);
    println!("Welcome back, {}!", auth.user.username);
    println!("export DSAQUEST_TOKEN={}", auth.token);
    Ok(auth)
}
