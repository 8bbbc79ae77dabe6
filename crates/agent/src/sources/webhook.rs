//! Alertmanager Webhook Payloads
//!
//! Structures for the Prometheus Alertmanager webhook format, and the
//! extraction of the fields the investigator consumes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct AlertmanagerWebhook {
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub status: String,
    pub alerts: Vec<AlertmanagerAlert>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AlertmanagerAlert {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    #[serde(rename = "startsAt", default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(rename = "endsAt", default)]
    pub ends_at: Option<DateTime<Utc>>,
}

/// The alert fields an investigation consumes, passed through unmodified.
/// Missing annotations become `"N/A"`.
#[derive(Debug, Clone)]
pub struct AlertData {
    pub summary: String,
    pub description: String,
    pub status: String,
    pub starts_at: String,
}

impl From<&AlertmanagerAlert> for AlertData {
    fn from(alert: &AlertmanagerAlert) -> Self {
        let annotation = |key: &str| {
            alert
                .annotations
                .get(key)
                .cloned()
                .unwrap_or_else(|| "N/A".to_string())
        };
        Self {
            summary: annotation("summary"),
            description: annotation("description"),
            status: if alert.status.is_empty() {
                "N/A".to_string()
            } else {
                alert.status.clone()
            },
            starts_at: alert
                .starts_at
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}
