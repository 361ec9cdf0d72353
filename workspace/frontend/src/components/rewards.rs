mod reward_card;
mod view;

pub use view::Rewards;
