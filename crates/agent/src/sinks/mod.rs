//! Notification Sinks
//!
//! Deliver investigation results for human consumption. Sink failures are
//! the caller's to log; they must never abort alert processing.

pub mod discord;
pub mod stdout;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SinkConfig;
use crate::{Error, Result};

pub use discord::DiscordSink;
pub use stdout::StdoutSink;

/// What gets rendered and delivered for one investigated alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub summary: String,
    pub description: String,
    pub status: String,
    pub investigation_summary: String,
    /// False marks an inconclusive or degraded investigation.
    pub converged: bool,
}

#[async_trait]
pub trait Sink: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Create a sink from configuration.
pub fn create_sink(config: &SinkConfig) -> Result<Arc<dyn Sink>> {
    match config.sink_type.to_lowercase().as_str() {
        "stdout" => Ok(Arc::new(StdoutSink::new(&config.format)?)),
        "discord" => {
            let url = config.discord_webhook_url.clone().ok_or_else(|| {
                Error::Config(
                    "DISCORD_WEBHOOK_URL must be set when using the discord sink".to_string(),
                )
            })?;
            Ok(Arc::new(DiscordSink::new(url)))
        }
        other => Err(Error::Config(format!("Unsupported sink type: {other}"))),
    }
}
