//! Server configuration from command-line flags and environment variables.

use std::{sync::Arc, time::Duration};

use clap::Parser;

use crate::{
    domain::{ModerationError, ModerationGate},
    infrastructure::moderation::{
        BlocklistModerationGate, DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiModerationGate,
        OpenAiSettings,
    },
};

/// Moderated chat room broker
#[derive(Debug, Clone, Parser)]
#[command(name = "parley-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "PARLEY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind (0 picks an ephemeral port)
    #[arg(long, env = "PARLEY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "PARLEY_LOG", default_value = "info")]
    pub log_level: String,

    /// Single origin allowed by CORS
    #[arg(long, env = "PARLEY_CORS_ORIGIN", default_value = "http://localhost:5173")]
    pub cors_origin: String,

    /// Enables the OpenAI classifier; without it the blocklist classifier is used
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub openai_model: String,

    /// Upper bound on a single classification call
    #[arg(long, env = "PARLEY_MODERATION_TIMEOUT_SECS", default_value_t = 10)]
    pub moderation_timeout_secs: u64,

    /// Comma-separated terms rejected by the blocklist classifier
    #[arg(long, env = "PARLEY_BLOCKLIST", value_delimiter = ',')]
    pub blocklist: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the moderation gate selected by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the OpenAI HTTP client cannot be constructed.
    pub fn moderation_gate(&self) -> Result<Arc<dyn ModerationGate>, ModerationError> {
        match &self.openai_api_key {
            Some(api_key) if !api_key.is_empty() => {
                let settings = OpenAiSettings {
                    api_key: api_key.clone(),
                    base_url: self.openai_base_url.trim_end_matches('/').to_string(),
                    model: self.openai_model.clone(),
                    timeout: Duration::from_secs(self.moderation_timeout_secs),
                };
                let gate = OpenAiModerationGate::new(settings)?;
                tracing::info!(model = %gate.model(), "Using OpenAI moderation");
                Ok(Arc::new(gate))
            }
            _ => {
                let gate = BlocklistModerationGate::new(&self.blocklist);
                tracing::info!(
                    terms = gate.terms().len(),
                    "OPENAI_API_KEY not set, using blocklist moderation"
                );
                Ok(Arc::new(gate))
            }
        }
    }
}
