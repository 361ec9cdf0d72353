mod view;

pub use view::Chatbot;
