use std::env;

/// Deployment environment, selecting log format and cookie hardening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development: pretty logs, relaxed defaults
    #[default]
    Development,
    /// Everything else: JSON logs
    Production,
}

impl Environment {
    /// Parse from the `ENVIRONMENT` variable; anything but "production"
    /// counts as development.
    pub fn from_env() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Self::Production,
            _ => Self::Development,
        }
    }

    /// Whether this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Server configuration, sourced from environment variables.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Postgres connection string
    pub database_url: String,
    /// Secret for verifying bearer tokens
    pub jwt_secret: String,
    /// Anthropic API key; when unset the generator runs fallback-only
    pub anthropic_api_key: Option<String>,
    /// Upper bound on a single AI generation call, in seconds
    pub ai_timeout_secs: u64,
    /// How long an untouched quiz session survives before eviction
    pub session_ttl_minutes: i64,
    /// TCP port to listen on
    pub port: u16,
    /// Deployment environment
    pub env: Environment,
}

impl ApiConfig {
    /// Load configuration from the environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a
    /// default. An `ANTHROPIC_API_KEY` that still carries the placeholder
    /// prefix is treated as unset.
    pub fn from_env() -> Result<Self, env::VarError> {
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.is_empty() && !key.starts_with("sk-ant-YOUR"));

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            anthropic_api_key,
            ai_timeout_secs: parse_or("AI_TIMEOUT_SECS", 20),
            session_ttl_minutes: parse_or("SESSION_TTL_MINUTES", 120),
            port: parse_or("PORT", 3000),
            env: Environment::from_env(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
