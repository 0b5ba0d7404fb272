//! Redis-backed cache.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use warden_common::AdminError;

use super::{CacheResult, KvCache};

/// Cache over a Redis connection manager (auto-reconnecting)
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis at `url`
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url).map_err(cache_error)?;
        let conn = ConnectionManager::new(client).await.map_err(cache_error)?;
        Ok(Self { conn })
    }
}

fn cache_error(err: redis::RedisError) -> AdminError {
    AdminError::Cache(err.to_string())
}

#[async_trait]
impl KvCache for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(cache_error)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        // PSETEX rejects a zero expiry
        let millis = (ttl.as_millis() as u64).max(1);
        conn.pset_ex::<_, _, ()>(key, value, millis)
            .await
            .map_err(cache_error)
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }
}
