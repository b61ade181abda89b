//! Client configuration, resolved once at startup.
//!
//! The only platform-dependent behavior in the client (the explicit
//! multipart `Content-Type` on Android) is driven by `Platform` here rather
//! than by checks inside the request path.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "GYMHUB_API_BASE_URL";
pub const ENV_PLATFORM: &str = "GYMHUB_PLATFORM";
pub const ENV_TIMEOUT_SECS: &str = "GYMHUB_TIMEOUT_SECS";

/// Runtime the host app is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Other
        }
    }

    /// Android's HTTP stack needs `multipart/form-data` set by the caller;
    /// everywhere else the client library writes the boundary header itself.
    pub fn forces_multipart_content_type(self) -> bool {
        self == Platform::Android
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "other" | "web" => Ok(Platform::Other),
            _ => Err(ConfigError::Invalid {
                key: ENV_PLATFORM,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    platform: Platform,
    timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the current platform with the default 10 s timeout.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            platform: Platform::current(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a setting name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_BASE_URL))?;
        let mut config = Self::new(base_url.trim());

        if let Some(platform) = lookup(ENV_PLATFORM) {
            config.platform = platform.parse()?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
