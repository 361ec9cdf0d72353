use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;

pub mod commands;
pub mod reporting;

use crate::config::{ClientSettings, DEFAULT_API_URL, DEFAULT_TIMEOUT_MS};
use commands::{chat, forum, friends, leaderboard, login, progress, rewards};

#[derive(Parser)]
#[command(name = "dsaquest")]
#[command(about = "DSA Quest client: progress, leaderboard, friends, rewards, forum and tutor chat")]
#[command(version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "DSAQUEST_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token from a previous `login`
    #[arg(long, global = true, env = "DSAQUEST_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Transport timeout in milliseconds
    #[arg(long, global = true, env = "DSAQUEST_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and print a token to export as DSAQUEST_TOKEN
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "DSAQUEST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show XP, level, coins and per-topic progress
    Progress,
    /// Show the global leaderboard
    Leaderboard,
    /// Manage friends and friend requests
    Friends {
        #[command(subcommand)]
        action: FriendsAction,
    },
    /// Browse and redeem rewards
    Rewards {
        #[command(subcommand)]
        action: RewardsAction,
    },
    /// Q&A forum
    Forum {
        #[command(subcommand)]
        action: ForumAction,
    },
    /// Ask the tutor bot; without a message, reads questions from stdin
    Chat {
        message: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum FriendsAction {
    /// List friends and pending requests
    List,
    /// Send a friend request
    Add { user_id: String },
    /// Accept one or more pending requests
    Accept {
        #[arg(required = true)]
        request_ids: Vec<String>,
    },
    /// Reject a pending request
    Reject { request_id: String },
    /// Remove a friend
    Remove { friend_id: String },
}

#[derive(Subcommand)]
pub enum RewardsAction {
    /// List the reward catalog
    List,
    /// Redeem a reward with coins
    Redeem { reward_id: String },
    /// Show past redemptions
    History,
}

#[derive(Subcommand)]
pub enum ForumAction {
    /// List questions
    List,
    /// Post a question
    Ask {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        body: String,

        /// Tag, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Answer a question
    Answer {
        question_id: String,

        #[arg(short, long)]
        body: String,
    },
    /// Vote on a question
    Vote {
        question_id: String,

        /// Down-vote instead of up-vote
        #[arg(long)]
        down: bool,
    },
}

impl Cli {
    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    pub async fn run(self) -> Result<()> {
        let context = self.settings().connect()?;
        let api = &context.api;

        let outcome = match self.command {
            Commands::Login { email, password } => login(api, &email, &password).await.map(|_| ()),
            Commands::Progress => progress(api).await.map(|_| ()),
            Commands::Leaderboard => leaderboard(api).await.map(|_| ()),
            Commands::Friends { action } => match action {
                FriendsAction::List => friends::list(api).await.map(|_| ()),
                FriendsAction::Add { user_id } => friends::add(api, &user_id).await,
                FriendsAction::Accept { request_ids } => friends::accept(api, &request_ids).await,
                FriendsAction::Reject { request_id } => friends::reject(api, &request_id).await,
                FriendsAction::Remove { friend_id } => friends::remove(api, &friend_id).await,
            },
            Commands::Rewards { action } => match action {
                RewardsAction::List => rewards::list(api).await.map(|_| ()),
                RewardsAction::Redeem { reward_id } => rewards::redeem(api, &reward_id).await.map(|_| ()),
                RewardsAction::History => rewards::history(api).await.map(|_| ()),
            },
            Commands::Forum { action } => match action {
                ForumAction::List => forum::list(api).await.map(|_| ()),
                ForumAction::Ask { title, body, tags } => forum::ask(api, title, body, tags).await.map(|_| ()),
                ForumAction::Answer { question_id, body } => forum::answer(api, &question_id, &body).await,
                ForumAction::Vote { question_id, down } => forum::vote(api, &question_id, !down).await,
            },
            Commands::Chat { message } => chat(api, message).await,
        };

        if outcome.is_err() && context.session.is_expired() {
            eprintln!("Your session has expired. Run `dsaquest login` to sign in again.");
        }
        outcome
    }
}
