use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use serde_json::json;

use vibe_debugger_agent::{
    agent::{Investigator, LoopObserver, ToolRegistry},
    llm::{MockCompletionClient, ToolCall},
    server::Server,
    sinks::{Notification, Sink},
    sources::AlertData,
};

/// Records the tool-call sequence of a loop run.
#[derive(Default)]
struct RecordingObserver {
    calls: Mutex<Vec<String>>,
}

impl LoopObserver for RecordingObserver {
    fn on_tool_result(&self, call: &ToolCall, _result: &str) {
        self.calls.lock().unwrap().push(call.name.clone());
    }
}

/// Captures notifications instead of delivering them; optionally fails the
/// first `fail_first` sends.
#[derive(Default)]
struct CaptureSink {
    notifications: Mutex<Vec<Notification>>,
    fail_first: Mutex<usize>,
}

#[async_trait::async_trait]
impl Sink for CaptureSink {
    fn name(&self) -> &str {
        "capture"
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        self.notifications.lock().unwrap().push(notification.clone());
        let mut fail_first = self.fail_first.lock().unwrap();
        if *fail_first > 0 {
            *fail_first -= 1;
            anyhow::bail!("channel unreachable");
        }
        Ok(())
    }
}

fn investigator() -> Investigator {
    Investigator::new(
        Arc::new(MockCompletionClient::new()),
        Arc::new(ToolRegistry::with_default_tools()),
    )
}

fn alert(summary: &str) -> AlertData {
    AlertData {
        summary: summary.to_string(),
        description: "A critical error has been detected".to_string(),
        status: "firing".to_string(),
        starts_at: "2025-09-21T12:00:00Z".to_string(),
    }
}

#[tokio::test]
async fn known_warning_is_diagnosed_as_non_critical() {
    let observer = Arc::new(RecordingObserver::default());
    let investigator = investigator().with_observer(observer.clone());

    let report = investigator
        .run(&alert("Known Warning - feature flag"))
        .await;

    assert!(report.converged);
    assert!(report.summary.contains("non-critical"));
    assert_eq!(
        *observer.calls.lock().unwrap(),
        vec!["check_known_issues".to_string()]
    );
}

#[tokio::test]
async fn fatal_error_is_traced_to_the_undefined_function() {
    let observer = Arc::new(RecordingObserver::default());
    let investigator = investigator().with_observer(observer.clone());

    let report = investigator.run(&alert("PHP fatal error on /broken")).await;

    assert!(report.converged);
    assert!(report.summary.contains("does_not_exist"));
    assert!(
        report.summary.to_lowercase().contains("roll back")
            || report.summary.to_lowercase().contains("rollback")
            || report.summary.to_lowercase().contains("hotfix")
    );
    assert_eq!(
        *observer.calls.lock().unwrap(),
        vec![
            "check_known_issues".to_string(),
            "get_release_info".to_string(),
            "analyze_code_changes".to_string(),
        ]
    );
}

#[tokio::test]
async fn identical_alerts_yield_identical_investigations() {
    let first_observer = Arc::new(RecordingObserver::default());
    let first = investigator()
        .with_observer(first_observer.clone())
        .run(&alert("PHP fatal error on /broken"))
        .await;

    let second_observer = Arc::new(RecordingObserver::default());
    let second = investigator()
        .with_observer(second_observer.clone())
        .run(&alert("PHP fatal error on /broken"))
        .await;

    assert_eq!(first.summary, second.summary);
    assert_eq!(
        *first_observer.calls.lock().unwrap(),
        *second_observer.calls.lock().unwrap()
    );
}

#[tokio::test]
async fn webhook_investigates_every_entry_and_notifies_the_sink() {
    let sink = Arc::new(CaptureSink::default());
    let server = Server::new(investigator(), sink.clone());
    let client = axum_test::TestServer::new(server.build_router()).unwrap();

    let payload = json!({
        "receiver": "vibe-debugger",
        "status": "firing",
        "alerts": [
            {
                "status": "firing",
                "annotations": {
                    "summary": "Known Warning - feature flag",
                    "description": "The 'custom_feature_flag' is not set"
                },
                "startsAt": "2025-09-21T12:00:00Z"
            },
            {
                "status": "firing",
                "annotations": {
                    "summary": "PHP fatal error on /broken",
                    "description": "A critical PHP fatal error has been detected"
                },
                "startsAt": "2025-09-21T12:05:00Z"
            }
        ]
    });

    let response = client.post("/webhook").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");

    let notifications = sink.notifications.lock().unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications[0].investigation_summary.contains("non-critical"));
    assert!(notifications[1]
        .investigation_summary
        .contains("does_not_exist"));
}

#[tokio::test]
async fn sink_failure_does_not_abort_remaining_alerts() {
    let sink = Arc::new(CaptureSink {
        notifications: Mutex::new(Vec::new()),
        fail_first: Mutex::new(1),
    });
    let server = Server::new(investigator(), sink.clone());
    let client = axum_test::TestServer::new(server.build_router()).unwrap();

    let payload = json!({
        "alerts": [
            {"status": "firing", "annotations": {"summary": "Known Warning"}},
            {"status": "firing", "annotations": {"summary": "PHP fatal error on /broken"}}
        ]
    });

    let response = client.post("/webhook").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Both entries were investigated and handed to the sink, despite the
    // first delivery failing.
    assert_eq!(sink.notifications.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn health_endpoint_reports_the_service() {
    let server = Server::new(investigator(), Arc::new(CaptureSink::default()));
    let client = axum_test::TestServer::new(server.build_router()).unwrap();

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "vibe-debugger-agent");
}
