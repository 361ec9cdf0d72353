pub mod error;
pub mod form;
pub mod loading;
pub mod toast;
