//! Configuration management for Warden.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file,
//! `WARDEN__*` environment variables, then CLI flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use warden_common::AdminError;
use warden_common::constants::{
    CAPTCHA_HEIGHT, CAPTCHA_TTL_MS, CAPTCHA_WIDTH, DEFAULT_LISTEN_ADDR, DEFAULT_REDIS_URL,
    MAX_TTL_MS, SESSION_TTL_MS,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Cache backend configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// The single administrative account
    #[serde(default)]
    pub admin: AdminAccount,

    /// Captcha configuration
    #[serde(default)]
    pub captcha: CaptchaConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Which cache implementation to run against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    /// In-process map; state is lost on restart
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: default_redis_url(),
        }
    }
}

/// Admin credentials; the password arrives already encoded by the client
#[derive(Clone, Default, Deserialize)]
pub struct AdminAccount {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAccount")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Captcha image and expiry settings
#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaConfig {
    #[serde(default = "default_captcha_width")]
    pub width: u32,

    #[serde(default = "default_captcha_height")]
    pub height: u32,

    /// Challenge validity in milliseconds
    #[serde(default = "default_captcha_ttl")]
    pub ttl_ms: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            width: default_captcha_width(),
            height: default_captcha_height(),
            ttl_ms: default_captcha_ttl(),
        }
    }
}

impl CaptchaConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session token validity in milliseconds
    #[serde(default = "default_session_ttl")]
    pub ttl_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_session_ttl(),
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_redis_url() -> String { DEFAULT_REDIS_URL.to_string() }
fn default_captcha_width() -> u32 { CAPTCHA_WIDTH }
fn default_captcha_height() -> u32 { CAPTCHA_HEIGHT }
fn default_captcha_ttl() -> u64 { CAPTCHA_TTL_MS }
fn default_session_ttl() -> u64 { SESSION_TTL_MS }

impl AppConfig {
    /// Load configuration from file and environment, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut builder = config::Config::builder();
        if Path::new(config_path).exists() {
            builder = builder.add_source(config::File::with_name(config_path));
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
        }

        let mut config: Self = builder
            .add_source(config::Environment::with_prefix("WARDEN").separator("__"))
            .build()
            .context("Failed to load config")?
            .try_deserialize()
            .context("Failed to parse config")?;

        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, args: &super::Args) {
        if let Some(ref redis_url) = args.redis_url {
            self.cache.redis_url = redis_url.clone();
        }
        if let Some(ref listen) = args.listen {
            self.listen_addr = listen.clone();
        }
        if let Some(ref account) = args.admin_account {
            self.admin.account = account.clone();
        }
        if let Some(ref password) = args.admin_password {
            self.admin.password = password.clone();
        }
        if args.memory_cache {
            self.cache.backend = CacheBackend::Memory;
        }
    }

    /// Reject configurations that would make login impossible or insecure
    pub fn validate(&self) -> Result<(), AdminError> {
        if self.admin.account.trim().is_empty() || self.admin.password.is_empty() {
            return Err(AdminError::Config(
                "admin.account and admin.password must be set".to_string(),
            ));
        }
        if self.captcha.ttl_ms == 0 {
            return Err(AdminError::Config("captcha.ttl_ms must be positive".to_string()));
        }
        if self.session.ttl_ms < 1000 {
            return Err(AdminError::Config(
                "session.ttl_ms must be at least 1000".to_string(),
            ));
        }
        if self.captcha.ttl_ms > MAX_TTL_MS || self.session.ttl_ms > MAX_TTL_MS {
            return Err(AdminError::Config(format!(
                "captcha.ttl_ms and session.ttl_ms must not exceed {MAX_TTL_MS}"
            )));
        }
        if self.captcha.width == 0 || self.captcha.height == 0 {
            return Err(AdminError::Config(
                "captcha dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cache: CacheConfig::default(),
            admin: AdminAccount::default(),
            captcha: CaptchaConfig::default(),
            session: SessionConfig::default(),
        }
    }
}
