pub mod auth;
pub mod client;
pub mod requests;

pub use auth::TwitchAuthState;
pub use client::TwitchHelixClient;
