//! Client configuration.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ClientError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("openbank-rust/", env!("CARGO_PKG_VERSION"));

/// Openbank deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://sandbox-api.openbank.stone.com.br",
            Environment::Production => "https://api.openbank.stone.com.br",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ClientError::Config(format!("Unknown environment: {}", s))),
        }
    }
}

/// Connection settings for [`HttpTransport`](crate::HttpTransport).
#[derive(Clone)]
pub struct ClientConfig {
    /// API root without a trailing slash
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set
    pub access_token: Option<String>,
    /// Upper bound for a whole request/response round trip
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Points the client at a custom API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// - `OPENBANK_ENVIRONMENT`: `sandbox` (default) or `production`
    /// - `OPENBANK_API_URL`: overrides the environment's base URL
    /// - `OPENBANK_ACCESS_TOKEN`: bearer token
    /// - `OPENBANK_TIMEOUT_SECS`: request timeout, default 30
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let environment = match lookup("OPENBANK_ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let mut config = Self::new(environment);

        if let Some(url) = lookup("OPENBANK_API_URL") {
            config = config.with_base_url(url);
        }

        if let Some(token) = lookup("OPENBANK_ACCESS_TOKEN") {
            config = config.with_access_token(token);
        }

        if let Some(secs) = lookup("OPENBANK_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ClientError::Config(format!("OPENBANK_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}

// Keeps the access token out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
