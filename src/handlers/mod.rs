pub mod assets;
pub mod export;
pub mod live_ws;
