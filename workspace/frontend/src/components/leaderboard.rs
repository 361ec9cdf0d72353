mod view;

pub use view::Leaderboard;
