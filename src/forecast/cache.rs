use super::types::AggregatedWeather;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use moka::Expiry;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time source for expiry checks.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Arc<AggregatedWeather>,
    pub ttl: Duration,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Lets moka evict each entry after its own TTL.
struct EntryTtl;

impl Expiry<String, CacheEntry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Expiring memo cache for aggregated weather.
///
/// Freshness is decided against the injected [`Clock`] on every read, so an
/// entry past its `expires_at` is treated as absent even if moka has not
/// evicted it yet. Reads never remove anything; stale entries are left to the
/// [`EntryTtl`] policy, so a read can't drop a value written after it looked.
/// Writes replace the whole entry.
#[derive(Clone)]
pub struct WeatherCache {
    entries: Cache<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let entries: Cache<String, CacheEntry> = Cache::builder().expire_after(EntryTtl).build();
        Self { entries, clock }
    }

    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.get(key).await?;
        entry.is_fresh(self.clock.now()).then_some(entry)
    }

    pub async fn put(&self, key: String, value: Arc<AggregatedWeather>, ttl: Duration) {
        let now = self.clock.now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.entries
            .insert(key, CacheEntry { value, ttl, expires_at })
            .await;
    }

    pub async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    /// Approximate number of stored entries, including ones not yet evicted.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}
