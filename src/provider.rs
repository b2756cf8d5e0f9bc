//! Sources of raw holiday lists.

use crate::HolidayRecord;

/// Something that can list a country's public holidays for a year.
///
/// Implementations return the provider's records as-is; deduplication and
/// ordering happen in the pipeline.
pub trait HolidayProvider {
    fn fetch(&self, year: i32, country: &str) -> crate::Result<Vec<HolidayRecord>>;
}

impl<P: HolidayProvider + ?Sized> HolidayProvider for &P {
    fn fetch(&self, year: i32, country: &str) -> crate::Result<Vec<HolidayRecord>> {
        (**self).fetch(year, country)
    }
}

impl<P: HolidayProvider + ?Sized> HolidayProvider for Box<P> {
    fn fetch(&self, year: i32, country: &str) -> crate::Result<Vec<HolidayRecord>> {
        (**self).fetch(year, country)
    }
}

#[cfg(feature = "http")]
pub use self::nager::{NagerDate, DEFAULT_BASE_URL};

#[cfg(feature = "http")]
mod nager {
    use std::time::Duration;

    use tracing::debug;

    use super::HolidayProvider;
    use crate::{Error, HolidayRecord};

    pub const DEFAULT_BASE_URL: &str = "https://date.nager.at";
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Blocking client for the Nager.Date public holiday API.
    #[derive(Clone)]
    pub struct NagerDate {
        base_url: String,
        agent: ureq::Agent,
    }

    impl NagerDate {
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
            let base_url = base_url.into().trim_end_matches('/').to_string();
            NagerDate {
                base_url,
                agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        pub fn url(&self, year: i32, country: &str) -> String {
            format!("{}/api/v3/PublicHolidays/{year}/{country}", self.base_url)
        }
    }

    impl std::fmt::Debug for NagerDate {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("NagerDate")
                .field("base_url", &self.base_url)
                .finish_non_exhaustive()
        }
    }

    impl Default for NagerDate {
        fn default() -> Self {
            Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
        }
    }

    impl HolidayProvider for NagerDate {
        fn fetch(&self, year: i32, country: &str) -> crate::Result<Vec<HolidayRecord>> {
            let url = self.url(year, country);
            debug!(%url, "requesting holidays");

            let response = match self.agent.get(&url).call() {
                Ok(it) => it,
                Err(ureq::Error::Status(code, _)) => return Err(Error::Status { code }),
                Err(e) => return Err(Error::Transport(e.to_string())),
            };
            let body = response
                .into_string()
                .map_err(|e| Error::Transport(e.to_string()))?;
            Ok(serde_json::from_str(&body)?)
        }
    }

}
