use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{bail, Context, Result};

/// Deployment flavour; picks the log format and default verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Human-readable logs at debug level.
    Local,
    /// JSON logs at debug level.
    Dev,
    /// JSON logs at info level.
    Prod,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => bail!("APP_ENV must be one of local, dev, prod (got '{other}')"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,

    /// SQLite connection string, e.g. "sqlite:./tracklink.db"
    pub database_url: String,

    pub db_max_connections: u32,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    pub port: u16,

    /// Length of aliases generated when a save request doesn't supply one
    pub alias_length: usize,

    /// Upper bound on a single request, enforced by the HTTP layer
    pub request_timeout: Duration,

    /// Directory with the browser front-end, served for unmatched paths
    pub static_dir: PathBuf,
}

const MAX_ALIAS_LENGTH: usize = 64;

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let env = var("APP_ENV", "local").parse::<Environment>()?;

        let db_max_connections = var("DB_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;
        if db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let port = var("PORT", "8082")
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let alias_length = var("ALIAS_LENGTH", "6")
            .parse::<usize>()
            .context("ALIAS_LENGTH must be a positive integer")?;
        if alias_length == 0 || alias_length > MAX_ALIAS_LENGTH {
            bail!("ALIAS_LENGTH must be between 1 and {MAX_ALIAS_LENGTH}");
        }

        let request_timeout = var("REQUEST_TIMEOUT_SECS", "4")
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            env,
            database_url: var("DATABASE_URL", "sqlite:./tracklink.db"),
            db_max_connections,
            host: var("HOST", "0.0.0.0"),
            port,
            alias_length,
            request_timeout,
            static_dir: PathBuf::from(var("STATIC_DIR", "./static")),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
