//! Shared types used across all guidebot crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The two independent knowledge domains the assistant answers questions about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// GOV.UK Design System style guide.
    DesignSystem,
    /// Posit Connect publishing and deployment guide.
    Publishing,
}

impl Domain {
    /// Stable identifier used in config files and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DesignSystem => "design_system",
            Self::Publishing => "publishing",
        }
    }

    /// Human-readable name for status pages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DesignSystem => "GOV.UK Design System",
            Self::Publishing => "Posit Connect",
        }
    }

    /// Returns both domains in corpus load order.
    pub fn all() -> [Self; 2] {
        [Self::DesignSystem, Self::Publishing]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain: {0}")]
pub struct UnknownDomain(pub String);

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "design_system" | "gds" | "govuk" => Ok(Self::DesignSystem),
            "publishing" | "posit" | "posit_connect" => Ok(Self::Publishing),
            other => Err(UnknownDomain(other.to_string())),
        }
    }
}

/// Global application configuration (gateway + assistant behaviour). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown on the status endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Domain used when a request does not name one.
    pub default_domain: Domain,
    /// When true, sessions let the classifier consult the documentation search fallback.
    #[serde(default = "default_true")]
    pub remote_lookup: bool,
    /// Optional upper bound on a single documentation search. No timeout when absent.
    #[serde(default)]
    pub remote_timeout_ms: Option<u64>,
    /// Optional upper bound on producing one assistant reply. When it expires the
    /// reply is the domain's "I'm here to help" text. No deadline when absent.
    #[serde(default)]
    pub response_deadline_ms: Option<u64>,
    /// When true, new sessions open with the domain welcome message.
    #[serde(default = "default_true")]
    pub greeting_enabled: bool,
    /// Gateway sessions untouched for this long are closed and dropped. 0 keeps them until deleted.
    #[serde(default = "default_session_idle_ttl_secs")]
    pub session_idle_ttl_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_session_idle_ttl_secs() -> u64 {
    1800
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "Guidebot".to_string(),
            port: 8001,
            default_domain: Domain::DesignSystem,
            remote_lookup: true,
            remote_timeout_ms: None,
            response_deadline_ms: None,
            greeting_enabled: true,
            session_idle_ttl_secs: default_session_idle_ttl_secs(),
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `GUIDEBOT_CONFIG` path > `config/guidebot.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("GUIDEBOT_CONFIG").unwrap_or_else(|_| "config/guidebot.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load config from the given TOML path (skipped when missing), then `GUIDEBOT__*` env overrides.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("app_name", "Guidebot")?
            .set_default("port", 8001_i64)?
            .set_default("default_domain", "design_system")?
            .set_default("remote_lookup", true)?
            .set_default("greeting_enabled", true)?
            .set_default("session_idle_ttl_secs", 1800_i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("GUIDEBOT").separator("__"))
            .build()?;

        built.try_deserialize()
    }

    /// Remote search timeout as a `Duration`, if configured.
    pub fn remote_timeout(&self) -> Option<std::time::Duration> {
        self.remote_timeout_ms.map(std::time::Duration::from_millis)
    }

    /// Reply deadline as a `Duration`, if configured.
    pub fn response_deadline(&self) -> Option<std::time::Duration> {
        self.response_deadline_ms.map(std::time::Duration::from_millis)
    }

    /// Idle lifetime of a gateway session; `None` when expiry is off.
    pub fn session_idle_ttl(&self) -> Option<std::time::Duration> {
        (self.session_idle_ttl_secs > 0)
            .then(|| std::time::Duration::from_secs(self.session_idle_ttl_secs))
    }
}
