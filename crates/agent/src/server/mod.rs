mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::Investigator;
use crate::sinks::Sink;

pub struct AppState {
    pub investigator: Investigator,
    pub sink: Arc<dyn Sink>,
}

pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(investigator: Investigator, sink: Arc<dyn Sink>) -> Self {
        Self {
            state: Arc::new(AppState { investigator, sink }),
        }
    }

    pub fn build_router(self) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route("/webhook", post(routes::webhook))
            .route("/metrics", get(routes::metrics))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    pub async fn start(self, addr: &str) -> crate::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr, "listening");
        axum::serve(listener, self.build_router())
            .await
            .map_err(crate::Error::Io)?;
        Ok(())
    }
}
