pub mod credential_refresh;
pub mod stream_watch;
