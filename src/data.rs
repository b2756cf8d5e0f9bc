use std::collections::HashSet;

use crate::pipeline::DEFAULT_YEAR;
use crate::HolidayRecord;

/// Every cache key starts with this.
pub(crate) const CACHE_KEY_PREFIX: &str = "holidays-";

/// Cache key under which a country's holiday list is stored.
#[inline]
pub fn cache_key(country: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{country}")
}

/// Cache key for `country` in `year`.
///
/// The default year keeps the plain [`cache_key`]; any other year gets its
/// own entry so lists for different years never shadow each other.
pub fn year_cache_key(country: &str, year: i32) -> String {
    if year == DEFAULT_YEAR {
        cache_key(country)
    } else {
        format!("{CACHE_KEY_PREFIX}{country}-{year}")
    }
}

/// Collapse records sharing a date and sort the rest by date.
///
/// For repeated dates the first record in input order is kept. The sort is
/// stable, so the result is fully determined by the input.
pub fn normalize(records: Vec<HolidayRecord>) -> Vec<HolidayRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut unique: Vec<HolidayRecord> = records
        .into_iter()
        .filter(|it| seen.insert(it.date))
        .collect();
    unique.sort_by_key(|it| it.date);
    unique
}

pub(crate) fn encode(records: &[HolidayRecord]) -> crate::Result<Vec<u8>> {
    Ok(serde_json::to_vec(records)?)
}

pub(crate) fn decode(bytes: &[u8]) -> crate::Result<Vec<HolidayRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}
