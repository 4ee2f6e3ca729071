use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::codegen::{
    CodeGenerator, CodeStrategy, CONTENT_CODE_LENGTH, DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS,
};
use crate::registry::MAX_SHORT_CODE_LENGTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    /// Base used to build `short_url` in API responses.
    /// If None, derived from the request's Host header.
    pub public_base_url: Option<String>,
    pub short_code: ShortCodeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortCodeConfig {
    pub strategy: CodeStrategy,
    pub length: usize,
    pub max_attempts: usize,
}

impl Default for ShortCodeConfig {
    fn default() -> Self {
        Self {
            strategy: CodeStrategy::Random,
            length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ShortCodeConfig {
    pub fn generator(&self) -> CodeGenerator {
        CodeGenerator::new(self.strategy, self.length, self.max_attempts)
    }
}

/// Content codes have a fixed length, so an explicit length only matters
/// for the random strategy
fn length_is_ignored(strategy: CodeStrategy, configured_length: Option<usize>) -> bool {
    strategy == CodeStrategy::Content
        && configured_length.is_some_and(|len| len != CONTENT_CODE_LENGTH)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let strategy = match std::env::var("SHORT_CODE_STRATEGY")
            .unwrap_or_else(|_| "random".to_string())
            .to_lowercase()
            .as_str()
        {
            "random" => CodeStrategy::Random,
            "content" | "hash" => CodeStrategy::Content,
            other => {
                tracing::warn!(
                    "Unknown SHORT_CODE_STRATEGY '{other}', falling back to 'random'. Supported values: random, content"
                );
                CodeStrategy::Random
            }
        };

        let configured_length = std::env::var("SHORT_CODE_LENGTH")
            .ok()
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("SHORT_CODE_LENGTH must be a positive integer")?;
        if length_is_ignored(strategy, configured_length) {
            tracing::warn!(
                "SHORT_CODE_LENGTH is ignored with SHORT_CODE_STRATEGY=content; content codes are always {} characters",
                CONTENT_CODE_LENGTH
            );
        }
        let length = configured_length.unwrap_or(DEFAULT_CODE_LENGTH);
        if length == 0 || length > MAX_SHORT_CODE_LENGTH {
            anyhow::bail!(
                "SHORT_CODE_LENGTH must be between 1 and {}",
                MAX_SHORT_CODE_LENGTH
            );
        }

        let max_attempts = std::env::var("SHORT_CODE_MAX_ATTEMPTS")
            .ok()
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("SHORT_CODE_MAX_ATTEMPTS must be a positive integer")?
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            anyhow::bail!("SHORT_CODE_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            server: ServerConfig { host, port },
            public_base_url,
            short_code: ShortCodeConfig {
                strategy,
                length,
                max_attempts,
            },
        })
    }
}
