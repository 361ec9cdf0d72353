//! Typed endpoint functions, one module per feature.
//!
//! Every function takes the executor explicitly and returns the backend's
//! payload as-is.

pub mod auth;
pub mod chatbot;
pub mod forum;
pub mod friends;
pub mod leaderboard;
pub mod progress;
pub mod rewards;
