/// Deployment environment, which selects the password hashing cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// `"production"` (any case) is production; anything else is not.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Credential hashing configuration, loaded once at startup.
///
/// `Debug` is implemented by hand so the pepper never reaches logs.
#[derive(Clone)]
pub struct AuthConfig {
    /// Server-side secret prepended to every password before hashing.
    pub pepper: String,
    pub environment: Environment,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("pepper", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

impl AuthConfig {
    /// Load credential configuration from environment variables.
    ///
    /// | Env Var       | Required | Default       |
    /// |---------------|----------|---------------|
    /// | `PEPPER`      | **yes**  | --            |
    /// | `ENVIRONMENT` | no       | `development` |
    ///
    /// # Panics
    ///
    /// Panics if `PEPPER` is not set or is empty. A missing pepper is a fatal
    /// startup error, never a per-request one.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("PEPPER").ok(),
            std::env::var("ENVIRONMENT").ok(),
        )
    }

    /// Build from raw values, applying the same rules as [`from_env`](Self::from_env).
    ///
    /// # Panics
    ///
    /// Panics if `pepper` is `None` or empty.
    pub fn from_values(pepper: Option<String>, environment: Option<String>) -> Self {
        let pepper = pepper.expect("PEPPER must be set in the environment");
        assert!(!pepper.is_empty(), "PEPPER must not be empty");

        let environment = environment
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);

        Self {
            pepper,
            environment,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the pepper have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds to wait for background tasks after the listener closes (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// How often expired sessions are physically purged, in seconds (default: `3600`).
    pub session_purge_interval_secs: u64,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `30`                    |
    /// | `SESSION_PURGE_INTERVAL_SECS` | `3600`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let session_purge_interval_secs: u64 = std::env::var("SESSION_PURGE_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SESSION_PURGE_INTERVAL_SECS must be a valid u64");

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            session_purge_interval_secs,
            auth,
        }
    }
}
