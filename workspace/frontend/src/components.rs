pub mod chatbot;
pub mod dashboard;
pub mod forum;
pub mod friends;
pub mod layout;
pub mod leaderboard;
pub mod login;
pub mod rewards;
