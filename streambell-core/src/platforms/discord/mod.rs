pub mod runtime;

pub use runtime::{DiscordNotifier, DiscordPlatform};
