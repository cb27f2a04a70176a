//! Slack: OAuth callback capture, code exchange and the status REST calls

pub mod client;
pub mod exchange;
pub mod oauth;
mod wire;

pub use client::SlackApiClient;
pub use exchange::SlackTokenExchanger;
pub use oauth::LoopbackCallbackListener;
