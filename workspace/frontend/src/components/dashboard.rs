mod topic_progress;
mod view;

pub use view::Dashboard;
