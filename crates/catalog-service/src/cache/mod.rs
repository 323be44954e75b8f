//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] abstracts the key-value backend. Lookups return a
//! tagged [`CacheLookup`] so callers cannot confuse an unreachable cache
//! with a hard failure.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheInterface, CacheLookup};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{create_redis_pool, RedisCacheService};
