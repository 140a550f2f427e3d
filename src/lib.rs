pub mod config;
pub mod cover;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod models;
pub mod state;
