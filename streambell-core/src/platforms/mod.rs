pub mod discord;
pub mod twitch;

pub use streambell_common::traits::platform_traits::{
    ConnectionStatus, Notifier, PlatformAuth, PlatformIntegration, StreamSource,
};
