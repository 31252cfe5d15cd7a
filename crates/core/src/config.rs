use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// When false, every extraction goes straight to the keyword heuristics.
    pub enabled: bool,
    pub provider: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u64,
    pub timeout_ms: u64,
    pub circuit: CircuitConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CircuitConfig {
    pub min_requests: u64,
    pub failure_rate: f64,
    pub cooldown_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub log_filter: String,
    pub json_logs: bool,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("SLIDE_INTENT_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__LLM__MODEL=gpt-4o to llm.model
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                enabled: true,
                provider: "openai".into(),
                model: "gpt-4o-mini".into(),
                temperature: 0.3,
                max_tokens: 2048,
                timeout_ms: 8000,
                circuit: CircuitConfig {
                    min_requests: 10,
                    failure_rate: 0.5,
                    cooldown_secs: 60,
                },
            },
            telemetry: TelemetryConfig {
                log_filter: "info,slide_intent=debug".into(),
                json_logs: false,
            },
        }
    }
}
