use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use super::AppState;
use crate::metrics;
use crate::sinks::Notification;
use crate::sources::{AlertData, AlertmanagerWebhook};

pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "vibe-debugger-agent"}))
}

pub async fn metrics() -> String {
    metrics::gather_metrics()
}

/// Receives alerts from Prometheus Alertmanager. Each entry is investigated
/// in order; a sink failure is logged and does not abort the remaining
/// entries.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AlertmanagerWebhook>,
) -> Json<Value> {
    info!(alerts = payload.alerts.len(), "received alertmanager webhook");

    for alert in &payload.alerts {
        let data = AlertData::from(alert);
        let report = state.investigator.run(&data).await;
        metrics::ALERTS_PROCESSED_TOTAL.inc();

        let notification = Notification {
            summary: data.summary,
            description: data.description,
            status: data.status,
            investigation_summary: report.summary,
            converged: report.converged,
        };
        if let Err(err) = state.sink.send(&notification).await {
            metrics::SINK_FAILURES_TOTAL.inc();
            error!(
                sink = state.sink.name(),
                error = %err,
                "failed to deliver notification"
            );
        }
    }

    Json(json!({"status": "ok"}))
}
