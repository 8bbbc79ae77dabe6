//! Stdout Sink
//!
//! Prints investigation results to standard output, as JSON or text.

use async_trait::async_trait;

use super::{Notification, Sink};
use crate::{Error, Result};

#[derive(Debug)]
pub struct StdoutSink {
    format: String,
}

impl StdoutSink {
    pub fn new(format: &str) -> Result<Self> {
        let format = format.to_lowercase();
        if format != "json" && format != "text" {
            return Err(Error::Config(format!(
                "Invalid format for stdout sink: {format}. Must be 'json' or 'text'"
            )));
        }
        Ok(Self { format })
    }

    fn render_text(notification: &Notification) -> String {
        format!(
            "=== Alert: {} ({})\n{}\n--- Investigation{} ---\n{}\n",
            notification.summary,
            notification.status,
            notification.description,
            if notification.converged {
                ""
            } else {
                " (inconclusive)"
            },
            notification.investigation_summary,
        )
    }
}

#[async_trait]
impl Sink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string(notification)?),
            _ => println!("{}", Self::render_text(notification)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> Notification {
        Notification {
            summary: "PHP fatal error on /broken".to_string(),
            description: "Fatal error detected".to_string(),
            status: "firing".to_string(),
            investigation_summary: "Root cause identified.".to_string(),
            converged: true,
        }
    }

    #[tokio::test]
    async fn json_sink_sends() {
        let sink = StdoutSink::new("json").unwrap();
        assert!(sink.send(&notification()).await.is_ok());
    }

    #[tokio::test]
    async fn text_sink_sends() {
        let sink = StdoutSink::new("text").unwrap();
        assert!(sink.send(&notification()).await.is_ok());
    }

    #[test]
    fn invalid_format_is_rejected() {
        assert!(StdoutSink::new("xml").is_err());
    }

    #[test]
    fn text_render_marks_inconclusive_runs() {
        let mut n = notification();
        n.converged = false;
        assert!(StdoutSink::render_text(&n).contains("(inconclusive)"));
    }
}
