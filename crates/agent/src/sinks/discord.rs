//! Discord Sink
//!
//! Delivers investigation results to a Discord channel via an incoming
//! webhook, rendered as an embed.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{Notification, Sink};

const COLOR_FIRING: u32 = 0xe74c3c;
const COLOR_RESOLVED: u32 = 0x2ecc71;

// Discord caps embed field values at 1024 characters.
const MAX_FIELD_LEN: usize = 1024;

#[derive(Debug, Serialize)]
struct WebhookBody {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
    fields: Vec<EmbedField>,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: String,
    value: String,
    inline: bool,
}

pub struct DiscordSink {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordSink {
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    fn build_body(notification: &Notification) -> WebhookBody {
        let mut analysis = notification.investigation_summary.clone();
        if analysis.len() > MAX_FIELD_LEN {
            analysis.truncate(
                analysis
                    .char_indices()
                    .take_while(|(i, _)| *i < MAX_FIELD_LEN - 1)
                    .map(|(i, c)| i + c.len_utf8())
                    .last()
                    .unwrap_or(0),
            );
            analysis.push('…');
        }

        let analysis_label = if notification.converged {
            "VibeDebugger Analysis"
        } else {
            "VibeDebugger Analysis (inconclusive)"
        };

        WebhookBody {
            embeds: vec![Embed {
                title: format!("🚨 New Alert: {}", notification.summary),
                description: notification.description.clone(),
                color: if notification.status == "firing" {
                    COLOR_FIRING
                } else {
                    COLOR_RESOLVED
                },
                fields: vec![
                    EmbedField {
                        name: "Status".to_string(),
                        value: notification.status.clone(),
                        inline: true,
                    },
                    EmbedField {
                        name: analysis_label.to_string(),
                        value: analysis,
                        inline: false,
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl Sink for DiscordSink {
    fn name(&self) -> &str {
        "discord"
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        let body = Self::build_body(notification);
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("discord webhook returned {status}: {text}");
        }
        debug!("notification delivered to discord");
        Ok(())
    }
}
