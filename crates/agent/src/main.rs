use std::sync::Arc;

use tracing::info;

use vibe_debugger_agent::{
    agent::{Investigator, ToolRegistry, TracingObserver},
    config::Config,
    llm::client::create_client,
    metrics,
    server::Server,
    sinks::create_sink,
    Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        sink = %config.sink.sink_type,
        "loaded configuration"
    );

    metrics::register_metrics();

    // Wire the investigation agent
    let client = create_client(&config.llm);
    let registry = Arc::new(ToolRegistry::with_default_tools());
    let investigator = Investigator::new(client, registry)
        .with_max_turns(config.agent.max_turns)
        .with_observer(Arc::new(TracingObserver));

    // Notification channel is an explicit dependency, never a global
    let sink = create_sink(&config.sink)?;

    // Start server
    info!(addr = %config.server.addr, "starting vibe-debugger");
    Server::new(investigator, sink)
        .start(&config.server.addr)
        .await?;

    Ok(())
}
