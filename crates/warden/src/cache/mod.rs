//! Key-value cache capability with server-side expiry.
//!
//! Both the challenge issuer and the session manager talk to the cache
//! only through [`KvCache`], so the Redis backend can be swapped for the
//! in-process one in development and tests.

mod memory;
mod redis_store;

pub use memory::MemoryCache;
pub use redis_store::RedisCache;

use async_trait::async_trait;
use std::time::Duration;
use warden_common::AdminError;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, AdminError>;

/// Atomic get/set/delete over string keys with TTL expiry
#[async_trait]
pub trait KvCache: Send + Sync {
    /// Fetch a live value
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store a value that expires after `ttl` (millisecond precision)
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Remove a key; removing a missing key is not an error
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Check backend connectivity
    async fn ping(&self) -> CacheResult<()>;
}
