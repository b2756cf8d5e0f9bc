//! Public-holiday lookups backed by the [Nager.Date](https://date.nager.at) API.
//!
//! Holiday lists are fetched once per country, deduplicated by date, sorted,
//! and kept in a [`CacheStore`] so later lookups never touch the network.
//! The derivations in [`query`] turn a list into "today's holiday", a
//! countdown to the next one, or a month-filtered view.
//!
//! ```no_run
//! use holiday_checker::{HolidayPipeline, MemoryStore, NagerDate, query};
//!
//! let mut pipeline = HolidayPipeline::new(NagerDate::default(), MemoryStore::new());
//! let holidays = pipeline.get_holidays("US");
//! let now = chrono::Local::now().naive_local();
//! if let Some(next) = query::next_holiday(&holidays, now) {
//!     println!("{} in {} days", next.holiday.local_name, next.days_until);
//! }
//! ```

pub mod cache;
mod checker;
mod country;
mod data;
mod date;
mod pipeline;
pub mod provider;
pub mod query;
mod ticker;

pub use cache::{CacheStore, FileStore, MemoryStore};
pub use checker::{HolidayChecker, Panel, Ticket};
pub use country::Country;
pub use data::{cache_key, normalize, year_cache_key};
pub use date::{days_until, CalendarDate, DateExt};
pub use pipeline::{HolidayPipeline, DEFAULT_YEAR};
#[cfg(feature = "http")]
pub use provider::NagerDate;
pub use provider::HolidayProvider;
pub use query::{Countdown, MonthFilter};
pub use ticker::Ticker;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single public holiday as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRecord {
    /// Date of holiday.
    pub date: NaiveDate,
    /// Name of holiday in the country's own language.
    pub local_name: String,
    /// Remaining provider fields, carried through the cache untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HolidayRecord {
    pub fn new(date: NaiveDate, local_name: impl Into<String>) -> Self {
        HolidayRecord {
            date,
            local_name: local_name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Error states the holiday checker might encounter.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Country code is not one of the supported countries.
    #[error("Holiday is not available for this country")]
    CountryNotAvailable,
    /// Country code was empty.
    #[error("Country code must not be empty")]
    EmptyCountryCode,
    /// Month filter was neither a month number, a month name nor "all".
    #[error("Invalid month filter: {0:?}")]
    InvalidMonth(String),
    /// Request never produced a response.
    #[error("Holiday provider unreachable: {0}")]
    Transport(String),
    /// Provider answered with a non-success status.
    #[error("Holiday provider returned status {code}")]
    Status { code: u16 },
    /// Payload or cache entry is not a valid holiday list.
    #[error("Malformed holiday data: {0}")]
    Json(#[from] serde_json::Error),
    /// Cache store I/O failed.
    #[error("Cache store failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
