use tracing::{debug, error, info, warn};

use crate::cache::CacheStore;
use crate::data::{decode, encode, normalize, year_cache_key};
use crate::provider::HolidayProvider;
use crate::{Error, HolidayRecord};

/// Year whose holidays are fetched unless configured otherwise.
pub const DEFAULT_YEAR: i32 = 2025;

/// Cache-aside access to per-country holiday lists.
///
/// A list is fetched from the provider at most once per cache lifetime;
/// afterwards it is served from the store without revalidation.
pub struct HolidayPipeline<P, S> {
    provider: P,
    store: S,
    year: i32,
}

impl<P: HolidayProvider, S: CacheStore> HolidayPipeline<P, S> {
    pub fn new(provider: P, store: S) -> Self {
        HolidayPipeline {
            provider,
            store,
            year: DEFAULT_YEAR,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_parts(self) -> (P, S) {
        (self.provider, self.store)
    }

    /// Store key of `country`'s list for the configured year.
    pub fn cache_key(&self, country: &str) -> String {
        year_cache_key(country, self.year)
    }

    /// Deduplicated, date-sorted holidays for `country`.
    ///
    /// Never fails: errors are logged and yield an empty list, leaving the
    /// cache untouched so the next call tries again.
    pub fn get_holidays(&mut self, country: impl AsRef<str>) -> Vec<HolidayRecord> {
        let country = country.as_ref();
        match self.try_get_holidays(country) {
            Ok(it) => it,
            Err(e) => {
                error!(country, error = %e, "error fetching holidays");
                Vec::new()
            }
        }
    }

    /// Like [`get_holidays`](Self::get_holidays) but reports the failure.
    pub fn try_get_holidays(
        &mut self,
        country: impl AsRef<str>,
    ) -> crate::Result<Vec<HolidayRecord>> {
        let country = country.as_ref();
        if country.trim().is_empty() {
            return Err(Error::EmptyCountryCode);
        }
        let key = self.cache_key(country);

        if let Some(cached) = self.cached(&key) {
            debug!(country, n = cached.len(), "cache hit");
            return Ok(cached);
        }

        info!(country, year = self.year, "fetching holidays");
        let fetched = self.provider.fetch(self.year, country)?;
        let holidays = normalize(fetched);
        info!(country, n = holidays.len(), "holidays fetched");

        // A failed write only costs a refetch next time.
        if let Err(e) = encode(&holidays).and_then(|bytes| self.store.set(&key, &bytes)) {
            warn!(country, error = %e, "failed to cache holidays");
        }
        Ok(holidays)
    }

    /// Cached list for `country`, without falling back to the provider.
    pub fn cached_holidays(&self, country: impl AsRef<str>) -> Option<Vec<HolidayRecord>> {
        self.cached(&self.cache_key(country.as_ref()))
    }

    fn cached(&self, key: &str) -> Option<Vec<HolidayRecord>> {
        let bytes = match self.store.get(key) {
            Ok(it) => it?,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };
        match decode(&bytes) {
            Ok(it) => Some(it),
            Err(e) => {
                warn!(key, error = %e, "corrupt cache entry, treating as miss");
                None
            }
        }
    }
}
