use anyhow::{bail, Context};
use std::time::Duration;
use url::Url;

use crate::network::DEFAULT_BASE_URL;
use crate::session::SessionConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub session: SessionTimingConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the shortening API, without the `/alias` route.
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct SessionTimingConfig {
    pub debounce_ms: u64,
    pub success_display_ms: u64,
}

impl ServiceConfig {
    const fn default_timeout_secs() -> u64 {
        30
    }

    fn default_user_agent() -> String {
        format!("snip/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SessionTimingConfig {
    const fn default_debounce_ms() -> u64 {
        SessionConfig::DEFAULT_DEBOUNCE_MS
    }

    const fn default_success_display_ms() -> u64 {
        SessionConfig::DEFAULT_SUCCESS_DISPLAY_MS
    }

    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            success_display: Duration::from_millis(self.success_display_ms),
            ..SessionConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: ServiceConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: ServiceConfig::default_timeout_secs(),
                user_agent: ServiceConfig::default_user_agent(),
            },
            session: SessionTimingConfig {
                debounce_ms: SessionTimingConfig::default_debounce_ms(),
                success_display_ms: SessionTimingConfig::default_success_display_ms(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. `from_env` uses the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let base_url = lookup("SHORTENER_BASE_URL").unwrap_or(defaults.service.base_url);
        let timeout_secs = parse_var(&lookup, "SHORTENER_TIMEOUT_SECS")?
            .unwrap_or(defaults.service.timeout_secs);
        let user_agent =
            lookup("SHORTENER_USER_AGENT").unwrap_or(defaults.service.user_agent);

        let debounce_ms =
            parse_var(&lookup, "SESSION_DEBOUNCE_MS")?.unwrap_or(defaults.session.debounce_ms);
        let success_display_ms = parse_var(&lookup, "SESSION_SUCCESS_DISPLAY_MS")?
            .unwrap_or(defaults.session.success_display_ms);

        let config = Config {
            service: ServiceConfig {
                base_url,
                timeout_secs,
                user_agent,
            },
            session: SessionTimingConfig {
                debounce_ms,
                success_display_ms,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> anyhow::Result<Self> {
        self.service.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let parsed = Url::parse(&self.service.base_url)
            .with_context(|| format!("invalid shortener base URL '{}'", self.service.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "shortener base URL must use http or https, got '{}'",
                parsed.scheme()
            );
        }
        if self.service.timeout_secs == 0 {
            bail!("SHORTENER_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}

fn parse_var<F>(lookup: &F, key: &str) -> anyhow::Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'"))
        })
        .transpose()
}
