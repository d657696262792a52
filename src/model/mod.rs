pub mod api;
pub mod auth;
pub mod journal;
pub mod state;
