mod composer;
mod question_card;
mod view;

pub use view::Forum;
