use serde::{Deserialize, Serialize};

use crate::agent::DEFAULT_MAX_TURNS;
use crate::llm::client::LlmConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub agent: AgentConfig,
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum completion calls per investigation.
    pub max_turns: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    pub sink_type: String,
    pub format: String,
    pub discord_webhook_url: Option<String>,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Config {
            server: ServerConfig {
                addr: std::env::var("SERVER_ADDR")
                    .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            },
            llm: LlmConfig {
                provider: std::env::var("LLM_PROVIDER")
                    .unwrap_or_else(|_| "openai".to_string())
                    .to_lowercase(),
                api_base: std::env::var("LLM_API_BASE")
                    .unwrap_or_else(|_| "http://localhost:4000".to_string()),
                model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
                api_key: std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
                temperature: std::env::var("LLM_TEMPERATURE")
                    .ok()
                    .and_then(|s| s.parse().ok()),
                max_tokens: std::env::var("LLM_MAX_TOKENS")
                    .ok()
                    .and_then(|s| s.parse().ok()),
            },
            agent: AgentConfig {
                max_turns: std::env::var("AGENT_MAX_TURNS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MAX_TURNS),
            },
            sink: SinkConfig {
                sink_type: std::env::var("SINK_TYPE")
                    .unwrap_or_else(|_| "stdout".to_string())
                    .to_lowercase(),
                format: std::env::var("SINK_FORMAT").unwrap_or_else(|_| "json".to_string()),
                discord_webhook_url: std::env::var("DISCORD_WEBHOOK_URL")
                    .ok()
                    .filter(|url| !url.is_empty()),
            },
        };

        if config.llm.api_key.is_none() && config.llm.provider != "mock" {
            tracing::warn!(
                "LLM_API_KEY is not set. Completion calls may fail against \
                 authenticated gateways."
            );
        }

        if config.agent.max_turns == 0 {
            return Err(crate::Error::Config(
                "AGENT_MAX_TURNS must be at least 1".to_string(),
            ));
        }

        if config.sink.sink_type == "discord" && config.sink.discord_webhook_url.is_none() {
            return Err(crate::Error::Config(
                "DISCORD_WEBHOOK_URL must be set when using the discord sink".to_string(),
            ));
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: "0.0.0.0:8080".to_string(),
            },
            llm: LlmConfig::default(),
            agent: AgentConfig {
                max_turns: DEFAULT_MAX_TURNS,
            },
            sink: SinkConfig {
                sink_type: "stdout".to_string(),
                format: "json".to_string(),
                discord_webhook_url: None,
            },
        }
    }
}
