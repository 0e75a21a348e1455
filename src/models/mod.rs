pub mod asset;
pub mod error;
pub mod history;
pub mod transition;
