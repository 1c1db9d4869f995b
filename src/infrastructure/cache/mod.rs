//! Caching layer sitting in front of the mapping repository.
//!
//! - [`DerivedValueCache`] - In-process cache with a time-bounded region (mapping
//!   count, identifier length) and an LRU resolution region (id -> url)
//! - [`CacheService`] - Optional shared resolution cache consulted after a local miss,
//!   with [`RedisCache`] and the no-op [`NullCache`]

mod derived_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use derived_cache::{CacheSettings, DerivedKey, DerivedValueCache};
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
