//! Derived views over a sorted holiday list.

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};

use crate::date::{days_until, CalendarDate, DateExt};
use crate::{Error, HolidayRecord};

/// Month restriction applied to a holiday list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// No restriction.
    #[default]
    All,
    /// Only holidays falling in this month.
    Only(Month),
}

impl MonthFilter {
    /// Filter for a month number, 1 through 12.
    pub fn from_number(month: u32) -> Result<Self, Error> {
        u8::try_from(month)
            .ok()
            .and_then(|it| Month::try_from(it).ok())
            .map(MonthFilter::Only)
            .ok_or_else(|| Error::InvalidMonth(month.to_string()))
    }

    #[inline]
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(month) => date.month() == month.number_from_month(),
        }
    }

    /// English month name, `None` when unrestricted.
    pub fn month_name(&self) -> Option<&'static str> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(month) => Some(month.name()),
        }
    }
}

impl std::str::FromStr for MonthFilter {
    type Err = Error;

    /// Accepts `""` or `"all"`, a month number, or an English month name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        if let Ok(number) = s.parse::<u32>() {
            return MonthFilter::from_number(number);
        }
        s.parse::<Month>()
            .map(MonthFilter::Only)
            .map_err(|_| Error::InvalidMonth(s.to_string()))
    }
}

impl std::fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.month_name() {
            Some(name) => f.write_str(name),
            None => f.write_str("All Months"),
        }
    }
}

/// The next upcoming holiday and how far away it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown<'a> {
    pub holiday: &'a HolidayRecord,
    /// Whole days until the holiday starts, rounded up.
    pub days_until: i64,
}

/// Local name of the holiday falling on `today`.
pub fn today_holiday(holidays: &[HolidayRecord], today: impl CalendarDate) -> Option<&str> {
    today
        .holiday_in(holidays)
        .map(|it| it.local_name.as_str())
}

/// First holiday strictly after the calendar date of `now`.
///
/// `holidays` must be sorted by date. The countdown measures from `now` to
/// midnight at the start of the holiday, so it is always at least 1. A
/// holiday on today's date is reported by [`today_holiday`], never here;
/// for an arbitrary target later the same day use [`days_until`].
pub fn next_holiday(holidays: &[HolidayRecord], now: NaiveDateTime) -> Option<Countdown<'_>> {
    let today = now.date();
    let holiday = holidays.iter().find(|it| it.date > today)?;
    let starts = holiday.date.and_hms_opt(0, 0, 0)?;
    Some(Countdown {
        holiday,
        days_until: days_until(starts, now),
    })
}

/// Holidays matching `filter`, in their original order.
pub fn filter_by_month(holidays: &[HolidayRecord], filter: MonthFilter) -> Iter<'_> {
    Iter {
        inner: holidays.iter(),
        filter,
    }
}

/// Iterator over month filter results.
#[derive(Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, HolidayRecord>,
    filter: MonthFilter,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a HolidayRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.find(|it| filter.matches(it.date))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.rfind(|it| filter.matches(it.date))
    }
}
