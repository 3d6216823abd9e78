use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// Verify endpoint of the managed auth provider. Every analysis request
    /// presents a bearer token that is checked here before any model call.
    pub auth_verify_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on open connections in the analysis-store pool.
    pub db_max_connections: u32,
    /// Bounded wait for each completion-service call, in seconds.
    pub llm_timeout_secs: u64,
    /// Optional cap on items per result category (suggestions, openers, tips…).
    /// The model is asked for exactly three but is free to return more;
    /// unset means "keep whatever came back".
    pub item_cap: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            auth_verify_url: require_env("AUTH_VERIFY_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            item_cap: match std::env::var("ANALYSIS_ITEM_CAP") {
                Ok(v) => Some(
                    v.parse::<usize>()
                        .context("ANALYSIS_ITEM_CAP must be a positive integer")?,
                ),
                Err(_) => None,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
