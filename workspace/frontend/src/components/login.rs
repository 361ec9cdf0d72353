mod view;

pub use view::{Login, LoginRequired};
