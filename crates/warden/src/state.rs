//! Application state and shared resources.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cache::{KvCache, MemoryCache, RedisCache};
use crate::captcha::ChallengeIssuer;
use crate::config::{AppConfig, CacheBackend};
use crate::session::SessionManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cache shared by every component
    pub cache: Arc<dyn KvCache>,

    /// Captcha issuer
    pub challenges: Arc<ChallengeIssuer>,

    /// Admin session manager
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Create new application state, connecting to the configured cache
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let cache: Arc<dyn KvCache> = match config.cache.backend {
            CacheBackend::Redis => Arc::new(
                RedisCache::connect(&config.cache.redis_url)
                    .await
                    .context("Failed to connect to Redis")?,
            ),
            CacheBackend::Memory => {
                tracing::warn!("Using in-memory cache; sessions will not survive a restart");
                Arc::new(MemoryCache::new())
            }
        };

        Ok(Self::with_cache(config, cache))
    }

    /// Build state around an existing cache
    pub fn with_cache(config: &AppConfig, cache: Arc<dyn KvCache>) -> Self {
        let challenges = Arc::new(ChallengeIssuer::new(
            cache.clone(),
            config.captcha.width,
            config.captcha.height,
            config.captcha.ttl(),
        ));
        let sessions = Arc::new(SessionManager::new(
            cache.clone(),
            config.admin.clone(),
            config.session.ttl(),
        ));

        Self {
            cache,
            challenges,
            sessions,
        }
    }
}
