//! In-process cache for values derived from the mapping table.

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use std::time::Duration;
use tracing::{debug, trace};

/// Sizing and expiry of the two cache regions.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Time-to-live of entries in the time-bounded region.
    pub derived_ttl: Duration,
    /// Maximum number of entries in the time-bounded region.
    pub derived_capacity: u64,
    /// Maximum number of entries in the resolution region.
    pub resolution_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            derived_ttl: Duration::from_secs(10 * 60),
            derived_capacity: 10,
            resolution_capacity: 128,
        }
    }
}

/// Key of a value in the time-bounded region.
///
/// Each variant carries the full set of inputs its value was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedKey {
    MappingCount,
    IdentifierLength {
        min_length: usize,
        /// `f64::to_bits` of the fill ratio, since `f64` is not `Hash`.
        max_fill_ratio_bits: u64,
    },
}

impl DerivedKey {
    pub fn identifier_length(min_length: usize, max_fill_ratio: f64) -> Self {
        Self::IdentifierLength {
            min_length,
            max_fill_ratio_bits: max_fill_ratio.to_bits(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DerivedKey::MappingCount => "count",
            DerivedKey::IdentifierLength { .. } => "length",
        }
    }
}

/// Shared cache of derived values and resolved identifiers.
///
/// Two independent regions:
///
/// - **derived**: mapping count and identifier length, expiring after
///   [`CacheSettings::derived_ttl`] and bounded by
///   [`CacheSettings::derived_capacity`]
/// - **resolution**: identifier to URL, never expiring (mappings are
///   immutable), bounded by [`CacheSettings::resolution_capacity`] with LRU
///   eviction
///
/// Entries are plain copies; dropping any of them only costs a recomputation.
/// Concurrent writers racing on the same key store equivalent values, so the
/// last write winning is harmless.
#[derive(Debug, Clone)]
pub struct DerivedValueCache {
    derived: Cache<DerivedKey, u64>,
    resolutions: Cache<String, String>,
}

impl DerivedValueCache {
    /// Creates both regions from the given settings.
    pub fn new(settings: &CacheSettings) -> Self {
        let derived = Cache::builder()
            .max_capacity(settings.derived_capacity)
            .time_to_live(settings.derived_ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        let resolutions = Cache::builder()
            .max_capacity(settings.resolution_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            derived,
            resolutions,
        }
    }

    /// Looks up a derived value.
    pub async fn get_derived(&self, key: &DerivedKey) -> Option<u64> {
        let value = self.derived.get(key).await;
        record_lookup(key.label(), value.is_some());
        debug!(?key, hit = value.is_some(), "Derived cache lookup");
        value
    }

    /// Stores a derived value, overwriting any previous one.
    pub async fn put_derived(&self, key: DerivedKey, value: u64) {
        trace!(?key, value, "Derived cache store");
        self.derived.insert(key, value).await;
    }

    /// Looks up the URL cached for an identifier.
    pub async fn get_resolution(&self, id: &str) -> Option<String> {
        let url = self.resolutions.get(id).await;
        record_lookup("resolution", url.is_some());
        url
    }

    /// Caches the URL of an identifier.
    pub async fn put_resolution(&self, id: String, url: String) {
        self.resolutions.insert(id, url).await;
    }

    /// Applies pending evictions and expirations on both regions.
    pub async fn run_pending_tasks(&self) {
        self.derived.run_pending_tasks().await;
        self.resolutions.run_pending_tasks().await;
    }

    /// Approximate number of cached resolutions.
    pub fn resolution_entry_count(&self) -> u64 {
        self.resolutions.entry_count()
    }
}

impl Default for DerivedValueCache {
    fn default() -> Self {
        Self::new(&CacheSettings::default())
    }
}

fn record_lookup(region: &'static str, hit: bool) {
    if hit {
        metrics::counter!("derived_cache_hits_total", "region" => region).increment(1);
    } else {
        metrics::counter!("derived_cache_misses_total", "region" => region).increment(1);
    }
}
