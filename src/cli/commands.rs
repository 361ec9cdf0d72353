pub mod chat;
pub mod forum;
pub mod friends;
pub mod leaderboard;
pub mod login;
pub mod progress;
pub mod rewards;

pub use chat::chat;
pub use leaderboard::leaderboard;
pub use login::login;
pub use progress::progress;
