mod add_friend;
mod view;

pub use view::{Friends, FriendsPanel};
